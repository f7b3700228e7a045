//! Scroll-triggered reveal shared by the landing sections.

use leptos::html::Div;
use leptos::prelude::*;

/// Share of an element that must be on screen before it animates in.
pub const REVEAL_THRESHOLD: f64 = 0.15;

/// Whether enough of an element (`top` and `height` relative to the
/// viewport) is visible.
pub fn should_reveal(top: f64, height: f64, viewportHeight: f64, threshold: f64) -> bool {
    if height <= 0.0 {
        return top < viewportHeight && top >= 0.0;
    }
    let visible = (top + height).min(viewportHeight) - top.max(0.0);
    visible / height >= threshold
}

/// Returns a signal that flips to true once `node` scrolls into view and
/// stays true afterwards. Server renders never reveal.
#[allow(unused_variables)]
pub fn use_reveal(node: NodeRef<Div>) -> ReadSignal<bool> {
    let (revealed, setRevealed) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        let check = move || {
            if revealed.get_untracked() {
                return;
            }
            let Some(element) = node.get_untracked() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let viewportHeight = window()
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or_default();
            if should_reveal(rect.top(), rect.height(), viewportHeight, REVEAL_THRESHOLD) {
                setRevealed.set(true);
            }
        };

        Effect::new(move |_| {
            if node.get().is_some() {
                check();
            }
        });

        let handle = window_event_listener(leptos::ev::scroll, move |_| check());
        on_cleanup(move || handle.remove());
    }

    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once_threshold_is_visible() {
        // 400px tall section near the bottom of an 800px viewport.
        assert!(!should_reveal(760.0, 400.0, 800.0, REVEAL_THRESHOLD));
        assert!(should_reveal(700.0, 400.0, 800.0, REVEAL_THRESHOLD));
        assert!(should_reveal(0.0, 400.0, 800.0, REVEAL_THRESHOLD));
    }

    #[test]
    fn partially_scrolled_past_still_counts() {
        assert!(should_reveal(-300.0, 400.0, 800.0, REVEAL_THRESHOLD));
        assert!(!should_reveal(-380.0, 400.0, 800.0, REVEAL_THRESHOLD));
        assert!(!should_reveal(900.0, 400.0, 800.0, REVEAL_THRESHOLD));
    }
}
