//! Story text: prompts, speech bubbles, banners and narration cards

use bevy::prelude::*;
use bevy::text::TextBounds;

use crate::constants::*;
use crate::world::{Stage, Tableau};

/// Visual treatment for a piece of story text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Large black prompt straight on the backdrop
    Prompt,
    /// Black on a white plate, wrapped narrow
    Bubble,
    /// Smaller bubble for the opening line
    SmallBubble,
    /// Wide bubble across the top of the screen
    Banner,
    /// Short aside above a character
    Whisper,
    /// White narration on the black screen
    Notice,
}

struct StyleSpec {
    font_size: f32,
    color: Color,
    plate: bool,
    wrap: Option<f32>,
}

impl TextStyle {
    fn spec(self, stage: &Stage) -> StyleSpec {
        match self {
            TextStyle::Prompt => StyleSpec {
                font_size: PROMPT_FONT,
                color: INK,
                plate: false,
                wrap: None,
            },
            TextStyle::Bubble => StyleSpec {
                font_size: BUBBLE_FONT,
                color: INK,
                plate: true,
                wrap: Some(BUBBLE_WRAP),
            },
            TextStyle::SmallBubble => StyleSpec {
                font_size: SMALL_BUBBLE_FONT,
                color: INK,
                plate: true,
                wrap: Some(BUBBLE_WRAP),
            },
            TextStyle::Banner => StyleSpec {
                font_size: BANNER_FONT,
                color: INK,
                plate: true,
                wrap: Some(BANNER_WRAP),
            },
            TextStyle::Whisper => StyleSpec {
                font_size: WHISPER_FONT,
                color: INK,
                plate: true,
                wrap: None,
            },
            TextStyle::Notice => StyleSpec {
                font_size: NOTICE_FONT,
                color: PAPER,
                plate: false,
                wrap: Some((stage.width - 100.0).max(BUBBLE_WRAP)),
            },
        }
    }
}

/// Text that stays up until cleared or until the scene ends
#[derive(Component)]
pub struct CaptionText;

/// The dialogue line currently on screen
#[derive(Component)]
pub struct LineText;

/// Rough size of the white plate behind wrapped text.
/// Glyphs are assumed to be about half as wide as the font is tall.
pub fn plate_size(text: &str, font_size: f32, wrap: Option<f32>) -> Vec2 {
    let glyph_width = font_size * 0.5;
    let line_height = font_size * 1.25;
    let raw_width = text.chars().count() as f32 * glyph_width;
    let (width, lines) = match wrap {
        Some(wrap) if raw_width > wrap => (wrap, (raw_width / wrap).ceil()),
        _ => (raw_width, 1.0),
    };
    Vec2::new(
        width + BUBBLE_PADDING.x * 2.0,
        lines * line_height + BUBBLE_PADDING.y * 2.0,
    )
}

/// Spawn centered text at a screen position and return the root entity
pub fn spawn_text(
    commands: &mut Commands,
    stage: &Stage,
    pos: Vec2,
    text: &str,
    style: TextStyle,
    marker: impl Bundle,
) -> Entity {
    let spec = style.spec(stage);
    let label = (
        Text2d::new(text),
        TextFont {
            font_size: spec.font_size,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(spec.color),
    );
    let translation = stage.to_world(pos, Z_TEXT);

    if spec.plate {
        let plate = plate_size(text, spec.font_size, spec.wrap);
        let mut root = commands.spawn((
            Sprite::from_color(PAPER, plate),
            Transform::from_translation(translation),
            Tableau,
            marker,
        ));
        root.with_children(|parent| {
            let mut child = parent.spawn((label, Transform::from_xyz(0.0, 0.0, 0.1)));
            if let Some(wrap) = spec.wrap {
                child.insert(TextBounds::new_horizontal(wrap));
            }
        });
        root.id()
    } else {
        let mut root = commands.spawn((
            label,
            Transform::from_translation(translation),
            Tableau,
            marker,
        ));
        if let Some(wrap) = spec.wrap {
            root.insert(TextBounds::new_horizontal(wrap));
        }
        root.id()
    }
}
