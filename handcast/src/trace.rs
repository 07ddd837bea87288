//! Recorded landmark traces.
//!
//! A trace is a file of s-expression frames, one per tracker callback:
//!
//! ```text
//! (:t 0 :width 1280 :height 720 :hand ((0.51 0.80 0.0) (0.47 0.74 -0.01) ...))
//! (:t 33 :hand nil)
//! ```
//!
//! `:width`/`:height` are optional and carry over to later frames.  Each
//! landmark is `(x y)` or `(x y z)`.  The landmark count is not checked
//! here; the recognizer rejects short or long sets itself.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use lexpr::Value;
use tracing::{info, warn};

use crate::gesture::landmarks::Landmark;
use crate::gesture::mapper::Viewport;
use crate::sexp::{get_float, get_value, is_nil, list_items, number_list};

/// One recorded tracker frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub timestamp_ms: f64,
    /// Viewport change at this frame, if recorded.
    pub viewport: Option<Viewport>,
    /// First hand's landmarks, `None` when no hand was detected.
    pub hand: Option<Vec<Landmark>>,
}

/// Parse trace text into frames.
pub fn parse_trace(raw: &str) -> anyhow::Result<Vec<TraceFrame>> {
    let wrapped = format!("({}\n)", raw);
    let value = lexpr::from_str(&wrapped).context("malformed trace s-expression")?;
    let items = list_items(&value).ok_or_else(|| anyhow!("trace is not a list of frames"))?;

    let mut frames = Vec::with_capacity(items.len());
    let mut last_t = f64::NEG_INFINITY;
    for (i, item) in items.into_iter().enumerate() {
        let frame = parse_frame(item).with_context(|| format!("trace frame {}", i))?;
        if frame.timestamp_ms < last_t {
            warn!(
                "Trace frame {} goes back in time ({:.0}ms after {:.0}ms)",
                i, frame.timestamp_ms, last_t
            );
        }
        last_t = frame.timestamp_ms;
        frames.push(frame);
    }
    Ok(frames)
}

/// Read and parse a trace file.
pub fn load_trace(path: &Path) -> anyhow::Result<Vec<TraceFrame>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    let frames = parse_trace(&raw).with_context(|| format!("in {}", path.display()))?;
    info!("Loaded trace {}: {} frames", path.display(), frames.len());
    Ok(frames)
}

fn parse_frame(value: &Value) -> anyhow::Result<TraceFrame> {
    let timestamp_ms = match get_value(value, "t") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| anyhow!(":t is not representable as f64"))?,
        Some(other) => bail!(":t must be a number, got {}", other),
        None => bail!("missing :t"),
    };

    let viewport = match (get_float(value, "width"), get_float(value, "height")) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(Viewport::new(w as f32, h as f32)),
        (None, None) => None,
        (w, h) => {
            warn!("Ignoring bad viewport at {:.0}ms: {:?}x{:?}", timestamp_ms, w, h);
            None
        }
    };

    let hand = match get_value(value, "hand") {
        None => None,
        Some(v) if is_nil(v) => None,
        Some(v) => Some(parse_hand(v)?),
    };

    Ok(TraceFrame {
        timestamp_ms,
        viewport,
        hand,
    })
}

fn parse_hand(value: &Value) -> anyhow::Result<Vec<Landmark>> {
    let points = list_items(value).ok_or_else(|| anyhow!(":hand must be a list of points"))?;
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| -> anyhow::Result<Landmark> {
            let coords =
                number_list(p).ok_or_else(|| anyhow!("landmark {} is not a number list", i))?;
            match coords.as_slice() {
                [x, y] => Ok(Landmark::new(*x as f32, *y as f32, 0.0)),
                [x, y, z] => Ok(Landmark::new(*x as f32, *y as f32, *z as f32)),
                _ => bail!("landmark {} has {} coordinates", i, coords.len()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frames() {
        let raw = "(:t 0 :width 1280 :height 720 :hand ((0.5 0.6 0.0) (0.4 0.35)))\n\
                   (:t 33 :hand nil)\n\
                   (:t 66)\n";
        let frames = parse_trace(raw).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].timestamp_ms, 0.0);
        assert_eq!(frames[0].viewport, Some(Viewport::new(1280.0, 720.0)));
        let hand = frames[0].hand.as_ref().unwrap();
        assert_eq!(hand.len(), 2);
        assert!((hand[1].x - 0.4).abs() < 1e-6);
        assert_eq!(hand[1].z, 0.0);
        assert_eq!(frames[1].timestamp_ms, 33.0);
        assert!(frames[1].hand.is_none());
        assert!(frames[1].viewport.is_none());
        assert!(frames[2].hand.is_none());
    }

    #[test]
    fn test_empty_trace() {
        assert!(parse_trace("").unwrap().is_empty());
        assert!(parse_trace("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_timestamp_is_error() {
        let err = parse_trace("(:t 0 :hand nil)\n(:hand nil)").unwrap_err();
        assert!(format!("{:#}", err).contains("trace frame 1"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_error() {
        assert!(parse_trace("(:t 0 :hand ((0.1 foo 0.0)))").is_err());
        assert!(parse_trace("(:t 0 :hand ((0.1)))").is_err());
        assert!(parse_trace("(:t \"zero\" :hand nil)").is_err());
    }

    #[test]
    fn test_wrong_count_passes_through() {
        let frames = parse_trace("(:t 0 :hand ((0.1 0.2) (0.3 0.4) (0.5 0.6)))").unwrap();
        assert_eq!(frames[0].hand.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_bad_viewport_ignored() {
        let frames = parse_trace("(:t 0 :width 0 :height 720 :hand nil)").unwrap();
        assert!(frames[0].viewport.is_none());
    }

    #[test]
    fn test_trailing_comment_without_newline() {
        let frames = parse_trace("(:t 0 :hand nil)\n; recorded by tracker").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].timestamp_ms, 0.0);
    }

    #[test]
    fn test_unbalanced_is_error() {
        assert!(parse_trace("(:t 0 :hand nil").is_err());
    }
}
