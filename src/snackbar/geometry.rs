//! Size, margins and button-width allocation.

/// Width given to an action button when it is the only one shown.
pub const ACTION_BUTTON_MAX_WIDTH: f64 = 64.0;
/// Width given to each action button when both are shown.
pub const ACTION_BUTTON_MIN_WIDTH: f64 = 44.0;
/// Width of the separator between the message and the buttons.
pub const SEPARATOR_WIDTH: f64 = 0.5;

/// Snackbar size and placement inside its container.
///
/// Values are clamped when assigned: the height never goes negative and the
/// corner radius stays within `[0, height / 2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    height: f64,
    left_margin: f64,
    right_margin: f64,
    bottom_margin: f64,
    corner_radius: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            height: 44.0,
            left_margin: 4.0,
            right_margin: 4.0,
            bottom_margin: 4.0,
            corner_radius: 4.0,
        }
    }
}

impl Geometry {
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub const fn left_margin(&self) -> f64 {
        self.left_margin
    }

    #[must_use]
    pub const fn right_margin(&self) -> f64 {
        self.right_margin
    }

    #[must_use]
    pub const fn bottom_margin(&self) -> f64 {
        self.bottom_margin
    }

    #[must_use]
    pub const fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Set the height; a smaller height re-clamps the corner radius.
    pub fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
        self.corner_radius = self.corner_radius.min(self.height / 2.0);
    }

    pub fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = radius.max(0.0).min(self.height / 2.0);
    }

    pub const fn set_left_margin(&mut self, margin: f64) {
        self.left_margin = margin;
    }

    pub const fn set_right_margin(&mut self, margin: f64) {
        self.right_margin = margin;
    }

    pub const fn set_bottom_margin(&mut self, margin: f64) {
        self.bottom_margin = margin;
    }

    /// Constraint constants pinning the view at its resting place.
    ///
    /// `right` and `bottom` are measured from the container's right and
    /// bottom edges, so insets are negative.
    #[must_use]
    pub fn resting_pins(&self) -> PinTargets {
        PinTargets {
            height: self.height,
            left: self.left_margin,
            right: -self.right_margin,
            bottom: -self.bottom_margin,
        }
    }
}

/// Numeric targets of the four pinning constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinTargets {
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Resolved widths of the two action buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonLayout {
    pub first_width: f64,
    pub second_width: f64,
    pub separator_visible: bool,
}

impl ButtonLayout {
    /// Split the button area between the active slots.
    ///
    /// A lone active slot takes the max width, two active slots share the
    /// min width, inactive slots collapse to zero. The separator is only
    /// shown when at least one slot is active.
    #[must_use]
    pub const fn allocate(first_active: bool, second_active: bool) -> Self {
        Self {
            first_width: slot_width(first_active, second_active),
            second_width: slot_width(second_active, first_active),
            separator_visible: first_active || second_active,
        }
    }

    /// Layout after the buttons were swapped for the busy indicator.
    #[must_use]
    pub const fn collapsed() -> Self {
        Self::allocate(false, false)
    }
}

const fn slot_width(active: bool, other_active: bool) -> f64 {
    match (active, other_active) {
        (false, _) => 0.0,
        (true, false) => ACTION_BUTTON_MAX_WIDTH,
        (true, true) => ACTION_BUTTON_MIN_WIDTH,
    }
}
