//! Literal content for the built-in experiments.

use super::{Experiment, ExperimentId};
use crate::controls::ControlSpec;
use crate::observation::table;

const COLOURS: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn experiments() -> Vec<Experiment> {
    vec![
        exploring_colours(),
        refraction(),
        absorption(),
        ice_lens(),
    ]
}

fn exploring_colours() -> Experiment {
    Experiment {
        id: ExperimentId(3),
        number: "03".into(),
        title: "Exploring Colours".into(),
        subtitle: "How coloured water changes the light that passes through it".into(),
        materials: lines(&[
            "Transparent glass or clear plastic cups",
            "Clean water",
            "Food colouring (red, blue, green, etc.)",
            "Flashlight or torch",
        ]),
        quick_setup: lines(&[
            "Fill each cup most of the way with water.",
            "Put a different food colour in each cup.",
            "Darken the room a little and get your torch ready.",
        ]),
        steps: lines(&[
            "Pour water into the cups, leaving a little empty space at the top.",
            "Add a few drops of a different food colouring into each cup and mix gently.",
            "Turn on the torch and shine it through one coloured cup at a time.",
            "Watch the colour of the beam on the table, wall or your hand.",
        ]),
        explanation: "White light is made of many colours. The coloured water keeps (absorbs) some \
            parts of the light and lets other parts pass through. The colour you see is the \
            part of the light that was not absorbed by the water."
            .into(),
        reflection_questions: lines(&[
            "What changed when you added more food colouring to a cup?",
            "Which colour made the strongest beam?",
            "How could you mix colours to make a new colour of light?",
        ]),
        controls: vec![
            ControlSpec::choice("colour", "Choose the colour of the water", &COLOURS),
            ControlSpec::integer(
                "intensity",
                "How strong is the colouring? (drops of food colouring)",
                1,
                10,
                1,
                5,
            ),
            ControlSpec::multi_choice("mix", "Pick two colours of light to mix", &COLOURS, 2),
        ],
        panels: table::exploring_colours(),
    }
}

fn refraction() -> Experiment {
    Experiment {
        id: ExperimentId(4),
        number: "04".into(),
        title: "Refraction with Water and Pencil".into(),
        subtitle: "Why objects can look bent under water".into(),
        materials: lines(&["Transparent glass", "Clean water", "Pencil, straw or stick"]),
        quick_setup: lines(&[
            "Fill the glass with water.",
            "Put the pencil so that it is part in water and part in air.",
            "Look from the side of the glass.",
        ]),
        steps: lines(&[
            "Fill the glass almost to the top with water.",
            "Place the pencil or straw so that it is standing or leaning in the glass, partly under the water.",
            "Look carefully at the point where the pencil meets the water surface.",
            "Move your head to different sides and heights and keep watching the pencil.",
        ]),
        explanation: "Light changes direction when it moves from air into water. This change of direction \
            is called refraction. The light from the part of the pencil in water reaches your eyes \
            from a different path than the light from the part in air. Your brain joins these paths \
            together and the pencil seems to be broken or bent at the water surface."
            .into(),
        reflection_questions: lines(&[
            "What happens to the bending when you use a wider glass?",
            "Would the effect be stronger in oil or in water?",
            "Where do you see similar bending effects in daily life?",
        ]),
        controls: vec![
            ControlSpec::integer(
                "angle",
                "Imagine you are looking from different angles. Move the slider.",
                0,
                90,
                1,
                30,
            ),
            ControlSpec::choice(
                "clarity",
                "How clear is the water?",
                &["Very clear", "Somewhat cloudy", "Quite cloudy"],
            ),
        ],
        panels: table::refraction(),
    }
}

fn absorption() -> Experiment {
    Experiment {
        id: ExperimentId(5),
        number: "05".into(),
        title: "Colourful Light Absorption".into(),
        subtitle: "Exploring how different colours handle light".into(),
        materials: lines(&[
            "Pieces of paper, cloth or plastic in different colours",
            "Scissors and tape",
            "Flashlight or other light source",
            "A darkened room or shaded corner",
        ]),
        quick_setup: lines(&[
            "Cut small pieces of different coloured materials.",
            "Darken the room slightly.",
            "Use the torch to shine light through or onto each piece.",
        ]),
        steps: lines(&[
            "Collect several materials of different colours and cut them into similar small pieces.",
            "Create a darker space by closing curtains or switching off some lights.",
            "Hold one piece at a time in front of the torch or place it on a flat surface and shine the light on it.",
            "Notice how bright or dark the material looks and what happens to the light behind or around it.",
        ]),
        explanation: "Objects handle light in different ways. Some take in (absorb) most of the light and \
            look dark. Others send most of the light back and look bright. A coloured object keeps \
            many colours from white light and sends back only a smaller range, which is the colour \
            that your eyes see."
            .into(),
        reflection_questions: lines(&[
            "Which colours became warmer to touch after shining the torch for some time?",
            "How would these findings be useful when choosing clothes for a hot day?",
            "What might this mean for building materials in hot climates?",
        ]),
        controls: vec![
            ControlSpec::choice(
                "material",
                "Choose a material colour",
                &["Black", "White", "Red", "Blue"],
            ),
            ControlSpec::integer(
                "time",
                "How many minutes has the light been shining?",
                1,
                10,
                1,
                1,
            ),
            ControlSpec::choice(
                "context",
                "Where could this matter?",
                &[
                    "Clothing choices",
                    "Roof material",
                    "Tent material",
                    "School wall paint",
                ],
            ),
        ],
        panels: table::absorption(),
    }
}

fn ice_lens() -> Experiment {
    Experiment {
        id: ExperimentId(6),
        number: "06".into(),
        title: "Ice Magnifying Glass".into(),
        subtitle: "Using ice to make objects look bigger".into(),
        materials: lines(&[
            "Flat, clear piece of ice (cube or slab)",
            "Small objects to observe such as leaves, insects, or toys",
            "Tray or plate to hold the melting ice",
        ]),
        quick_setup: lines(&[
            "Prepare a flat, clear piece of ice.",
            "Place small objects on a tray.",
            "Hold the ice between your eye and the object.",
        ]),
        steps: lines(&[
            "Prepare or take a flat piece of clear ice. Ask an adult to support if needed.",
            "Collect small items, for example leaves, printed letters or tiny toys, and place them on a surface.",
            "Hold the ice carefully between your fingers and place it between your eye and one object.",
            "Move the ice nearer or farther from the object and from your eye until the image looks large and clear.",
        ]),
        explanation: "When light travels through different materials such as air and ice, its speed and direction change. \
            The curved shape of the ice can bend and focus light, similar to a simple magnifying glass. \
            By changing the distance between the ice and the object, you find a position where the light \
            forms a clear, enlarged image for your eye."
            .into(),
        reflection_questions: lines(&[
            "What happened as the ice started to melt?",
            "How is this similar to using a real magnifying glass?",
            "Where might people use similar ideas in daily tools or technology?",
        ]),
        controls: vec![
            ControlSpec::integer(
                "distance",
                "Move the virtual ice closer or farther from the object",
                1,
                10,
                1,
                5,
            ),
            ControlSpec::integer("melt", "How much of the ice has melted? (%)", 0, 100, 10, 0),
        ],
        panels: table::ice_lens(),
    }
}
