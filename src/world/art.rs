//! Image handles for every picture the story shows

use bevy::prelude::*;

use crate::constants::*;

/// Every image the story references, by asset name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Art {
    Eagle,
    Coyote,
    Turtle,
    Diver,
    Island,
    Underwater,
    Rock,
    Shark1,
    Shark2,
    Ocean,
    Seed,
    Land,
}

impl Art {
    pub const ALL: [Art; 12] = [
        Art::Eagle,
        Art::Coyote,
        Art::Turtle,
        Art::Diver,
        Art::Island,
        Art::Underwater,
        Art::Rock,
        Art::Shark1,
        Art::Shark2,
        Art::Ocean,
        Art::Seed,
        Art::Land,
    ];

    /// File under `assets/`
    pub fn file(self) -> &'static str {
        match self {
            Art::Eagle => "Eagle.png",
            Art::Coyote => "coyote.png",
            Art::Turtle => "turtle-l.png",
            Art::Diver => "turtle.png",
            Art::Island => "island-bg.png",
            Art::Underwater => "underwater.png",
            Art::Rock => "rock.png",
            Art::Shark1 => "Shark1.png",
            Art::Shark2 => "Shark2.png",
            Art::Ocean => "Ocean.png",
            Art::Seed => "seed.png",
            Art::Land => "land.png",
        }
    }

    /// Unscaled display size. Backdrops are stretched to the stage instead.
    pub fn size(self) -> Vec2 {
        match self {
            Art::Eagle => EAGLE_SIZE,
            Art::Coyote => COYOTE_SIZE,
            Art::Turtle => TURTLE_SIZE,
            Art::Diver => DIVER_SIZE,
            Art::Rock => ROCK_SIZE,
            Art::Shark1 | Art::Shark2 => SHARK_SIZE,
            Art::Seed => SEED_SIZE,
            Art::Island | Art::Underwater | Art::Ocean | Art::Land => Vec2::ONE,
        }
    }
}

/// Loaded image handles. Headless apps have no asset server and get an
/// empty library, so every sprite uses the default image.
#[derive(Resource, Clone)]
pub struct ArtLibrary {
    handles: Vec<(Art, Handle<Image>)>,
}

impl FromWorld for ArtLibrary {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<AssetServer>() {
            Some(asset_server) => {
                info!("Queued {} images", Art::ALL.len());
                Self::load(asset_server)
            }
            None => Self::empty(),
        }
    }
}

impl ArtLibrary {
    pub fn empty() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    pub fn load(asset_server: &AssetServer) -> Self {
        Self {
            handles: Art::ALL
                .iter()
                .map(|art| (*art, asset_server.load(art.file())))
                .collect(),
        }
    }

    pub fn get(&self, art: Art) -> Handle<Image> {
        self.handles
            .iter()
            .find(|(a, _)| *a == art)
            .map(|(_, handle)| handle.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_handle_is_default() {
        let library = ArtLibrary::empty();
        assert_eq!(library.get(Art::Eagle), Handle::<Image>::default());
    }

    #[test]
    fn test_headless_world_gets_empty_library() {
        let mut app = App::new();
        app.init_resource::<ArtLibrary>();
        assert!(app.world().resource::<ArtLibrary>().handles.is_empty());
    }

    #[test]
    fn test_character_art_has_size() {
        for art in [Art::Eagle, Art::Coyote, Art::Turtle, Art::Diver, Art::Rock, Art::Seed] {
            assert!(art.size().x > 1.0 && art.size().y > 1.0, "{:?}", art);
        }
    }
}
