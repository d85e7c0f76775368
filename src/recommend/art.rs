use tracing::debug;

use crate::clients::{ArtImage, ArtLookup};

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://wikisound.org/mastering/Audio-waveform-player/data/default_artwork/music_ph.png";

/// `extralarge`, then `large`, then the first entry; empty urls never win.
pub fn pick_image(images: &[ArtImage]) -> Option<String> {
    fn non_empty(image: Option<&ArtImage>) -> Option<&str> {
        image.map(|i| i.url.as_str()).filter(|u| !u.is_empty())
    }
    let by_size = |size: &str| non_empty(images.iter().find(|i| i.size == size));

    by_size("extralarge")
        .or_else(|| by_size("large"))
        .or_else(|| non_empty(images.first()))
        .map(str::to_string)
}

/// Album art, then artist art, then the placeholder. Lookup errors go straight to the placeholder.
pub async fn resolve_cover_art(art: &dyn ArtLookup, artist: &str, track: &str) -> String {
    match art.track_images(artist, track).await {
        Ok(images) => {
            if let Some(url) = pick_image(&images) {
                return url;
            }
        }
        Err(e) => {
            debug!(error = %e, %artist, %track, "album art lookup failed");
            return PLACEHOLDER_IMAGE_URL.to_string();
        }
    }

    match art.artist_images(artist).await {
        Ok(images) => pick_image(&images).unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        Err(e) => {
            debug!(error = %e, %artist, "artist art lookup failed");
            PLACEHOLDER_IMAGE_URL.to_string()
        }
    }
}
