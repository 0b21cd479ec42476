//! Scene content - every line, position and beat of the story
//!
//! Positions are computed from the stage size so the layout follows the
//! window captured at startup.

use bevy::prelude::*;

use super::script::{Caption, Cue, Placement};
use super::{Role, StoryScene};
use crate::constants::*;
use crate::dialogue::DialogueLine;
use crate::input::KeyGate;
use crate::ui::{Ease, TextStyle};
use crate::world::{ActorSpec, Art, Stage};

pub const START_PROMPT: &str = "Press any key to begin";

pub const CHALLENGE_BRIEFING: &str = "Help turtle collect as much mud from the bottom of the ocean, avoid dying to the sharks\n\nPress any key to begin";

pub const MUD_RETURN_CARD: &str = "Turtle then rushed to the top of the ocean to return the collected mud but unfortunately Turtle struggled against the currents. Turtle was only able to return a small amount of mud on his fingertips";

pub const TURTLE_THANKS_CARD: &str = "Thanks to Turtle's bravery and efforts, Eagle and Coyote can now shape the land and spread the people across.";

pub const EAGLE_FLIGHT_CARD: &str = "Eagle then flew across the vast ocean and spread his newly created mixture of the mud and Chiyu seeds.";

pub const FINAL_CARD: &str = "The seeds spread across the ocean created new land for the People, the People are now One with The Land";

/// Background of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Picture(Art),
    Black,
}

/// Everything a narrative scene needs on entry
#[derive(Debug, Clone)]
pub struct SceneScript {
    pub backdrop: Backdrop,
    /// Cast on stage from the first frame
    pub cast: Vec<(Role, ActorSpec)>,
    pub cues: Vec<Cue>,
}

fn eagle(stage: &Stage) -> ActorSpec {
    ActorSpec::new(Art::Eagle, Vec2::new(stage.width / 2.0, stage.tree_y())).scaled(CHARACTER_SCALE)
}

fn coyote(stage: &Stage) -> ActorSpec {
    ActorSpec::new(Art::Coyote, Vec2::new(stage.width / 4.0, stage.island_y()))
        .scaled(CHARACTER_SCALE)
}

/// Turtle starts below the bottom-right corner and swims up
fn surfacing_turtle(stage: &Stage) -> ActorSpec {
    ActorSpec::new(Art::Turtle, Vec2::new(stage.width - 100.0, stage.height))
        .scaled(CHARACTER_SCALE)
}

fn bubble(role: Role, text: &str, style: TextStyle) -> Cue {
    Cue::Caption(Caption::new(
        text,
        Placement::Above(role, BUBBLE_OFFSET),
        style,
    ))
}

fn centered(stage: &Stage, text: &str, style: TextStyle) -> Cue {
    Cue::Caption(Caption::new(text, Placement::At(stage.center()), style))
}

fn line(role: Role, text: &str) -> DialogueLine {
    DialogueLine::new(role, text, LINE_DURATION)
}

/// Script for a narrative scene. The challenge has no script.
pub fn script_for(scene: StoryScene, stage: &Stage) -> Option<SceneScript> {
    let script = match scene {
        StoryScene::Intro => intro(stage),
        StoryScene::UnderwaterChallenge => return None,
        StoryScene::MudReturnMessage => card(stage, MUD_RETURN_CARD, StoryScene::SeedReturnDialogue),
        StoryScene::SeedReturnDialogue => seed_return(stage),
        StoryScene::TurtleThanksMessage => {
            card(stage, TURTLE_THANKS_CARD, StoryScene::LandMixingDialogue)
        }
        StoryScene::LandMixingDialogue => land_mixing(stage),
        StoryScene::EagleFlightMessage => {
            card(stage, EAGLE_FLIGHT_CARD, StoryScene::SeedSpreadAnimation)
        }
        StoryScene::SeedSpreadAnimation => seed_spread(stage),
        StoryScene::FinalMessage => card(stage, FINAL_CARD, StoryScene::LandReveal),
        StoryScene::LandReveal => SceneScript {
            backdrop: Backdrop::Picture(Art::Land),
            cast: Vec::new(),
            cues: Vec::new(),
        },
    };
    Some(script)
}

fn intro(stage: &Stage) -> SceneScript {
    let turtle = surfacing_turtle(stage);
    let cues = vec![
        Cue::Caption(Caption::new(
            START_PROMPT,
            Placement::At(stage.center()),
            TextStyle::Prompt,
        )),
        Cue::AwaitKey(KeyGate::Any),
        Cue::ClearCaptions,
        Cue::Enter(Role::Eagle, eagle(stage)),
        Cue::Enter(Role::Coyote, coyote(stage)),
        bubble(
            Role::Coyote,
            "I feel confined on this tiny island. We need more land to roam freely and support life.",
            TextStyle::SmallBubble,
        ),
        Cue::Wait(BEAT_PAUSE),
        bubble(
            Role::Eagle,
            "From up here, all I see is endless ocean. If only there was a way to create more land for us and the people.",
            TextStyle::Bubble,
        ),
        Cue::Enter(Role::Turtle, turtle),
        Cue::Move {
            role: Role::Turtle,
            to: Vec2::new(stage.width - 200.0, stage.waterline_y()),
            duration: TURTLE_SURFACE_TIME,
            ease: Ease::Power2,
            blocking: true,
        },
        Cue::ClearCaptions,
        Cue::Dialogue(vec![
            line(
                Role::Turtle,
                "I am Turtle. I will dive to the depths of the ocean and bring back some earth to create new land.",
            ),
            line(
                Role::Eagle,
                "Turtle, I am Eagle. I thank you from the bottom of my heart. We need land to support people.",
            ),
            line(
                Role::Coyote,
                "I am Coyote, please help us in creating more land so we can roam freely and help the people of this small land.",
            ),
        ]),
        Cue::Caption(Caption::new(
            "Turtle took in a big gulp of air",
            Placement::At(Vec2::new(stage.width / 2.0, 50.0)),
            TextStyle::Banner,
        )),
        Cue::Caption(Caption::new(
            "*inhale*",
            Placement::Above(Role::Turtle, WHISPER_OFFSET),
            TextStyle::Whisper,
        )),
        Cue::Wait(BEAT_PAUSE),
        Cue::ClearCaptions,
        Cue::Blackout,
        centered(stage, CHALLENGE_BRIEFING, TextStyle::Notice),
        Cue::AwaitKey(KeyGate::Any),
        Cue::Advance(StoryScene::UnderwaterChallenge),
    ];
    SceneScript {
        backdrop: Backdrop::Picture(Art::Island),
        cast: Vec::new(),
        cues,
    }
}

/// Black narration card that waits for Enter
fn card(stage: &Stage, text: &str, next: StoryScene) -> SceneScript {
    SceneScript {
        backdrop: Backdrop::Black,
        cast: Vec::new(),
        cues: vec![
            centered(stage, text, TextStyle::Notice),
            Cue::AwaitKey(KeyGate::Enter),
            Cue::Advance(next),
        ],
    }
}

fn seed_return(stage: &Stage) -> SceneScript {
    let eagle = eagle(stage);
    SceneScript {
        backdrop: Backdrop::Picture(Art::Island),
        cast: vec![
            (Role::Eagle, eagle),
            (Role::Coyote, coyote(stage)),
            (Role::Turtle, surfacing_turtle(stage)),
        ],
        cues: vec![
            Cue::Move {
                role: Role::Turtle,
                to: Vec2::new(eagle.pos.x, stage.waterline_y()),
                duration: TURTLE_RETURN_TIME,
                ease: Ease::Power2,
                blocking: true,
            },
            Cue::Dialogue(vec![
                line(
                    Role::Turtle,
                    "Turtle: The waters were treacherous. I lost most of the mud we needed.",
                ),
                line(
                    Role::Turtle,
                    "Turtle: I struggled against the current and nearly lost it all, but here, I have a small amount of mud on my fingertip.",
                ),
                line(
                    Role::Eagle,
                    "Eagle: Well done, Turtle. This will be enough to start forming the land.",
                ),
                line(
                    Role::Coyote,
                    "Coyote: Yes, we can begin shaping the earth now. Thank you, Turtle.",
                ),
                line(
                    Role::Turtle,
                    "Turtle: I will now return to the sea. I wish you luck in creating land for everyone and hope my story lives on for generations to come.",
                ),
            ]),
            Cue::Wait(BEAT_PAUSE),
            Cue::Advance(StoryScene::TurtleThanksMessage),
        ],
    }
}

/// Three lines paced by Enter, then Eagle takes off
fn land_mixing(stage: &Stage) -> SceneScript {
    let eagle = eagle(stage);
    let cruise_y = eagle.pos.y - EAGLE_RISE_HEIGHT;
    let lines = [
        (
            Role::Eagle,
            "Eagle: With the mud Turtle brought, we need to mix it with the Chiyu seeds to create the foundation of the earth.",
        ),
        (
            Role::Coyote,
            "Coyote: Let's carefully blend them together. This will shape the land and bring life to our world.",
        ),
        (
            Role::Eagle,
            "Eagle: Yes, this small piece of mud is just the beginning. Together, we'll expand it and form the land.",
        ),
    ];

    // Each Enter takes the current bubble down, the last one included
    let mut cues = Vec::new();
    for (role, text) in lines {
        cues.push(bubble(role, text, TextStyle::Bubble));
        cues.push(Cue::AwaitKey(KeyGate::Enter));
        cues.push(Cue::ClearCaptions);
    }
    cues.extend([
        Cue::Move {
            role: Role::Eagle,
            to: Vec2::new(eagle.pos.x, cruise_y),
            duration: EAGLE_RISE_TIME,
            ease: Ease::Power1,
            blocking: true,
        },
        Cue::Move {
            role: Role::Eagle,
            to: Vec2::new(stage.width + eagle.display_size().x, cruise_y),
            duration: EAGLE_DEPART_TIME,
            ease: Ease::Linear,
            blocking: true,
        },
        Cue::Advance(StoryScene::EagleFlightMessage),
    ]);

    SceneScript {
        backdrop: Backdrop::Picture(Art::Island),
        cast: vec![(Role::Eagle, eagle), (Role::Coyote, coyote(stage))],
        cues,
    }
}

fn seed_spread(stage: &Stage) -> SceneScript {
    let eagle = ActorSpec::new(Art::Eagle, Vec2::new(-50.0, 50.0)).scaled(CHARACTER_SCALE);
    SceneScript {
        backdrop: Backdrop::Picture(Art::Ocean),
        cast: vec![(Role::Eagle, eagle)],
        cues: vec![
            Cue::DropSeeds {
                role: Role::Eagle,
                interval: SEED_DROP_INTERVAL,
                count: SEED_DROP_COUNT,
            },
            Cue::Move {
                role: Role::Eagle,
                to: Vec2::new(stage.width + eagle.display_size().x, eagle.pos.y),
                duration: EAGLE_CROSSING_TIME,
                ease: Ease::Linear,
                blocking: true,
            },
            Cue::Advance(StoryScene::FinalMessage),
        ],
    }
}
