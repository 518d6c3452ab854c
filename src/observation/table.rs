//! Authored observation tables, one function per experiment.
//!
//! Bin edges are content thresholds: a boundary value belongs to the upper
//! bin unless the bin list says otherwise.

use super::Emphasis;
use super::rules::{Bin, Caveat, ChoiceEntry, Panel, Rule};

pub fn exploring_colours() -> Vec<Panel> {
    vec![
        Panel {
            id: "beam",
            rule: Rule::Choice {
                key: "colour",
                entries: vec![
                    ChoiceEntry {
                        option: "Red",
                        text: "The beam looks reddish because the water has removed much of the other colours from the white light.",
                    },
                    ChoiceEntry {
                        option: "Blue",
                        text: "The beam looks blue because most of the red and green parts of the light have been taken in by the water.",
                    },
                    ChoiceEntry {
                        option: "Green",
                        text: "The beam has a green look because mainly green light is passing through to your eyes.",
                    },
                    ChoiceEntry {
                        option: "Yellow",
                        text: "The beam looks yellow because the water is letting the yellow part of the light pass more easily.",
                    },
                ],
                emphasis: Emphasis::Success,
            },
            caveats: vec![Caveat {
                key: "intensity",
                template: "With colouring strength {value} of 10, more drops make the beam dimmer but do not change which part of the light gets through.",
            }],
        },
        Panel {
            id: "mix",
            rule: Rule::Pair {
                key: "mix",
                template: "Shine the {first} beam and the {second} beam onto the same patch of white paper. What new colour appears where they overlap?",
                prompt: "Select two different colours to see what happens when their light is mixed.",
                emphasis: Emphasis::Info,
            },
            caveats: vec![],
        },
    ]
}

pub fn refraction() -> Vec<Panel> {
    vec![
        Panel {
            id: "bend",
            rule: Rule::Bins {
                key: "angle",
                bins: vec![
                    Bin {
                        lo: 0,
                        hi: 19,
                        text: "From almost straight above, the bending is hard to see.",
                        emphasis: Emphasis::Info,
                    },
                    Bin {
                        lo: 20,
                        hi: 59,
                        text: "From the side, the pencil looks clearly bent where it enters the water.",
                        emphasis: Emphasis::Success,
                    },
                    Bin {
                        lo: 60,
                        hi: 90,
                        text: "From a very low side angle, the bending looks even stronger.",
                        emphasis: Emphasis::Info,
                    },
                ],
            },
            caveats: vec![],
        },
        Panel {
            id: "clarity",
            rule: Rule::Choice {
                key: "clarity",
                entries: vec![
                    ChoiceEntry {
                        option: "Very clear",
                        text: "In very clear water the break at the surface is sharp and easy to spot.",
                    },
                    ChoiceEntry {
                        option: "Somewhat cloudy",
                        text: "In slightly cloudy water the pencil still looks bent, but its outline under the water is softer.",
                    },
                    ChoiceEntry {
                        option: "Quite cloudy",
                        text: "In cloudy water much of the light is scattered, so the part of the pencil under water is hard to make out at all.",
                    },
                ],
                emphasis: Emphasis::Info,
            },
            caveats: vec![],
        },
    ]
}

pub fn absorption() -> Vec<Panel> {
    vec![
        Panel {
            id: "absorb",
            rule: Rule::Choice {
                key: "material",
                entries: vec![
                    ChoiceEntry {
                        option: "Black",
                        text: "The material looks very dark because it keeps almost all the light that hits it.",
                    },
                    ChoiceEntry {
                        option: "White",
                        text: "The material looks bright because it sends back most of the light in many directions.",
                    },
                    ChoiceEntry {
                        option: "Red",
                        text: "The material sends back mainly red light and keeps most of the other colours.",
                    },
                    ChoiceEntry {
                        option: "Blue",
                        text: "The material sends back mostly blue light and keeps much of the rest.",
                    },
                ],
                emphasis: Emphasis::Success,
            },
            caveats: vec![Caveat {
                key: "time",
                template: "After {value} min under the light, touch each piece: darker pieces usually feel warmer because the light they keep turns into heat.",
            }],
        },
        Panel {
            id: "context",
            rule: Rule::Template {
                key: "context",
                template: "Think about {option}: light colours send back more sunlight and stay cooler, while dark colours take it in and warm up.",
                emphasis: Emphasis::Info,
            },
            caveats: vec![],
        },
    ]
}

pub fn ice_lens() -> Vec<Panel> {
    vec![
        Panel {
            id: "lens",
            rule: Rule::Bins {
                key: "distance",
                bins: vec![
                    Bin {
                        lo: 1,
                        hi: 3,
                        text: "The ice is too close to the object. The image is large but may look blurry.",
                        emphasis: Emphasis::Info,
                    },
                    Bin {
                        lo: 4,
                        hi: 7,
                        text: "The distance is medium and comfortable. The object looks bigger and fairly clear.",
                        emphasis: Emphasis::Success,
                    },
                    Bin {
                        lo: 8,
                        hi: 10,
                        text: "The ice is far away. The magnifying effect is weaker.",
                        emphasis: Emphasis::Info,
                    },
                ],
            },
            caveats: vec![],
        },
        Panel {
            id: "melt",
            rule: Rule::Bins {
                key: "melt",
                bins: vec![
                    Bin {
                        lo: 0,
                        hi: 29,
                        text: "The ice is still firm, so its shape is stable and the image stays steady.",
                        emphasis: Emphasis::Info,
                    },
                    Bin {
                        lo: 30,
                        hi: 69,
                        text: "The melting ice is losing its smooth curve, so the image looks wobbly and distorted.",
                        emphasis: Emphasis::Info,
                    },
                    Bin {
                        lo: 70,
                        hi: 100,
                        text: "Most of the ice has melted. Without its curved shape the magnifying effect is gone.",
                        emphasis: Emphasis::Info,
                    },
                ],
            },
            caveats: vec![],
        },
    ]
}
