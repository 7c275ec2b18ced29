//! Quatrain rendering: the view model shown by the terminal front end and the
//! static page templates.

use serde::Serialize;

use crate::models::{Quatrain, QuatrainId};

/// Canonical embeddable video prefix.
pub const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Default base path for quatrain images.
pub const DEFAULT_IMAGE_BASE: &str = "images";

/// Options that affect rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base path images are resolved against.
    pub image_base: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }
}

/// One French line and its English translation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePair {
    pub french: String,
    pub english: String,
}

/// Embedded video region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEmbed {
    /// Source for the embed frame.
    pub src: String,
}

/// Image region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

/// Rendered quatrain. `None` for video or image hides that region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuatrainView {
    pub id: QuatrainId,
    pub title: String,
    pub lines: Vec<LinePair>,
    pub interpretation: String,
    pub video: Option<VideoEmbed>,
    pub image: Option<ImageView>,
}

impl QuatrainView {
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Enabled state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Render a quatrain record.
pub fn render(id: QuatrainId, quatrain: &Quatrain, options: &RenderOptions) -> QuatrainView {
    if !quatrain.lines_aligned() {
        tracing::warn!(
            "Quatrain {}: {} French lines but {} English lines, extra lines dropped",
            id,
            quatrain.french.len(),
            quatrain.english.len()
        );
    }

    let lines = quatrain
        .line_pairs()
        .map(|(french, english)| LinePair {
            french: french.to_string(),
            english: english.to_string(),
        })
        .collect();

    let video = quatrain.video.as_deref().map(|url| VideoEmbed {
        src: embed_url(url),
    });

    let image = quatrain.image.as_deref().map(|filename| ImageView {
        src: image_src(&options.image_base, filename),
        alt: format!("Image for Quatrain {}", id.number),
    });

    QuatrainView {
        id,
        title: id.title(),
        lines,
        interpretation: quatrain.interpretation.clone(),
        video,
        image,
    }
}

/// Check if a URL is a YouTube link we know how to embed.
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com/watch?v=") || url.contains("youtu.be/")
}

/// Rewrite a hosting link into an embeddable source.
///
/// `youtube.com/watch?v=ID` and `youtu.be/ID` become `EMBED_PREFIX + ID`;
/// anything else is returned unchanged.
pub fn embed_url(url: &str) -> String {
    if !is_youtube_url(url) {
        return url.to_string();
    }

    let video_id = if let Some((_, rest)) = url.split_once("youtube.com/watch?v=") {
        rest.split(['&', '#']).next()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split(['?', '&', '#', '/']).next()
    } else {
        None
    };

    match video_id {
        Some(id) if !id.is_empty() => format!("{}{}", EMBED_PREFIX, id),
        _ => url.to_string(),
    }
}

fn image_src(base: &str, filename: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", base, filename.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quatrain(french: &[&str], english: &[&str]) -> Quatrain {
        Quatrain {
            french: french.iter().map(|s| s.to_string()).collect(),
            english: english.iter().map(|s| s.to_string()).collect(),
            interpretation: "I".to_string(),
            video: None,
            image: None,
        }
    }

    fn id(c: u32, n: u32) -> QuatrainId {
        QuatrainId::from_parts(c, n).unwrap()
    }

    #[test]
    fn test_embed_url_watch() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=ABC123&t=5"),
            "https://www.youtube.com/embed/ABC123"
        );
        assert_eq!(
            embed_url("https://youtube.com/watch?v=QQQ"),
            "https://www.youtube.com/embed/QQQ"
        );
    }

    #[test]
    fn test_embed_url_short() {
        assert_eq!(
            embed_url("https://youtu.be/XYZ789?t=2"),
            "https://www.youtube.com/embed/XYZ789"
        );
        assert_eq!(
            embed_url("https://youtu.be/XYZ789"),
            "https://www.youtube.com/embed/XYZ789"
        );
    }

    #[test]
    fn test_embed_url_passthrough() {
        for url in [
            "https://vimeo.com/12345",
            "https://www.youtube.com/embed/already",
            "not a url at all",
            "https://youtu.be/",
        ] {
            assert_eq!(embed_url(url), url);
        }
    }

    #[test]
    fn test_render_basic() {
        let view = render(id(1, 1), &quatrain(&["A", "B"], &["C", "D"]), &RenderOptions::default());
        assert_eq!(view.title, "Century 1 - Quatrain 1");
        assert_eq!(
            view.lines,
            vec![
                LinePair { french: "A".into(), english: "C".into() },
                LinePair { french: "B".into(), english: "D".into() },
            ]
        );
        assert_eq!(view.interpretation, "I");
        assert!(!view.has_video());
        assert!(!view.has_image());
    }

    #[test]
    fn test_render_media() {
        let mut q = quatrain(&["A"], &["B"]);
        q.video = Some("https://youtu.be/XYZ789?t=2".to_string());
        q.image = Some("Michel_de_Nostredame.jpg".to_string());
        let view = render(id(2, 14), &q, &RenderOptions::default());
        assert_eq!(view.video.unwrap().src, "https://www.youtube.com/embed/XYZ789");
        let image = view.image.unwrap();
        assert_eq!(image.src, "images/Michel_de_Nostredame.jpg");
        assert_eq!(image.alt, "Image for Quatrain 14");
    }

    #[test]
    fn test_render_image_base() {
        let mut q = quatrain(&["A"], &["B"]);
        q.image = Some("x.png".to_string());
        let options = RenderOptions {
            image_base: "/static/img/".to_string(),
        };
        assert_eq!(render(id(1, 2), &q, &options).image.unwrap().src, "/static/img/x.png");
    }

    #[test]
    fn test_render_mismatched_lines() {
        let view = render(id(3, 3), &quatrain(&["A", "B", "E"], &["C", "D"]), &RenderOptions::default());
        assert_eq!(view.lines.len(), 2);
    }
}
