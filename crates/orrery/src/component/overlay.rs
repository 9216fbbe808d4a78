//! Help-overlay visibility.
//!
//! The demo shows one of two mutually exclusive regions: the help text, or
//! a one-line hint that says how to bring the help back. [`OverlayHider`]
//! owns both and flips between them on `hudToggle`.
//!
//! ```text
//!   hudToggle held │ shift held │ start_hidden │ result
//!   ───────────────┼────────────┼──────────────┼─────────
//!        yes       │    yes     │    true      │ hidden
//!        yes       │    no      │    true      │ shown
//!        yes       │    yes     │    false     │ shown
//!        yes       │    no      │    false     │ hidden
//!        no        │     -      │      -       │ unchanged
//! ```

use crate::input::{Input, actions};

/// Whether a region is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Visible,
    Hidden,
}

/// A named piece of overlay text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRegion {
    pub id: String,
    pub text: String,
    display: Display,
}

impl OverlayRegion {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            display: Display::Visible,
        }
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn is_visible(&self) -> bool {
        self.display == Display::Visible
    }
}

/// Toggles between the help region and the hint region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayHider {
    show: OverlayRegion,
    hint: OverlayRegion,
    start_hidden: bool,
    hidden: bool,
}

impl OverlayHider {
    /// `show` is the help region, `hint` is displayed while help is hidden.
    pub fn new(show: OverlayRegion, hint: OverlayRegion, start_hidden: bool) -> Self {
        let mut hider = Self {
            show,
            hint,
            start_hidden,
            hidden: start_hidden,
        };
        hider.hide(start_hidden);
        hider
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn show_region(&self) -> &OverlayRegion {
        &self.show
    }

    pub fn hint_region(&self) -> &OverlayRegion {
        &self.hint
    }

    /// The region currently on screen.
    pub fn visible_region(&self) -> &OverlayRegion {
        if self.hidden { &self.hint } else { &self.show }
    }

    pub(crate) fn update(&mut self, input: &Input) {
        if input.is_action_down(actions::HUD_TOGGLE) {
            self.hide(input.is_action_down(actions::SHIFT) == self.start_hidden);
        }
    }

    fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
        let (off, on) = if hidden {
            (&mut self.show, &mut self.hint)
        } else {
            (&mut self.hint, &mut self.show)
        };
        off.display = Display::Hidden;
        on.display = Display::Visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hider(start_hidden: bool) -> OverlayHider {
        OverlayHider::new(
            OverlayRegion::new("show-overlay", "help"),
            OverlayRegion::new("hide-overlay", "press H"),
            start_hidden,
        )
    }

    fn input(shift: bool) -> Input {
        let mut input =
            Input::from_bindings([(actions::HUD_TOGGLE, "h"), (actions::SHIFT, "Shift")], false);
        input.press_key("h");
        if shift {
            input.press_key("Shift");
        }
        input
    }

    #[test]
    fn construction_applies_start_policy() {
        let h = hider(true);
        assert!(h.is_hidden());
        assert!(!h.show_region().is_visible());
        assert!(h.hint_region().is_visible());

        let h = hider(false);
        assert!(!h.is_hidden());
        assert_eq!(h.visible_region().id, "show-overlay");
        assert_eq!(h.hint_region().display(), Display::Hidden);
    }

    #[test]
    fn no_toggle_leaves_state_alone() {
        let mut h = hider(true);
        let idle = Input::from_bindings([(actions::HUD_TOGGLE, "h"), (actions::SHIFT, "Shift")], false);
        h.update(&idle);
        assert!(h.is_hidden());
    }

    #[test]
    fn regions_are_mutually_exclusive() {
        for start_hidden in [true, false] {
            for shift in [true, false] {
                let mut h = hider(start_hidden);
                h.update(&input(shift));
                assert_ne!(h.show_region().is_visible(), h.hint_region().is_visible());
            }
        }
    }

    #[test]
    fn toggle_truth_table() {
        // (start_hidden, shift held) -> hidden
        let table = [
            (true, true, true),
            (true, false, false),
            (false, true, false),
            (false, false, true),
        ];
        for (start_hidden, shift, hidden) in table {
            let mut h = hider(start_hidden);
            h.update(&input(shift));
            assert_eq!(h.is_hidden(), hidden, "start_hidden={start_hidden} shift={shift}");
        }
    }
}
