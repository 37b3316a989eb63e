use std::fmt;

/// Discrete single-hand gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gesture {
    #[default]
    None,
    Fist,
    OneFinger,
    TwoFingers,
    ThreeFingers,
    FourFingers,
    OpenPalm,
}

impl Gesture {
    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Fist => "fist",
            Gesture::OneFinger => "one_finger",
            Gesture::TwoFingers => "two_fingers",
            Gesture::ThreeFingers => "three_fingers",
            Gesture::FourFingers => "four_fingers",
            Gesture::OpenPalm => "open_palm",
        }
    }

    /// Lookup by extended-finger count. Counts above five saturate.
    pub fn from_extended(count: u8) -> Gesture {
        match count {
            0 => Gesture::Fist,
            1 => Gesture::OneFinger,
            2 => Gesture::TwoFingers,
            3 => Gesture::ThreeFingers,
            4 => Gesture::FourFingers,
            _ => Gesture::OpenPalm,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one hand.
///
/// A pinch is reported as `Fist`: the pinch trigger and a closed hand share the
/// label, so consumers that need to tell them apart must also look at
/// `HandData::is_pinching`. A closed hand without a pinch (no finger extended)
/// is `Fist` as well.
#[inline]
pub fn classify_gesture(is_pinching: bool, extended_fingers: u8) -> Gesture {
    if is_pinching {
        Gesture::Fist
    } else {
        Gesture::from_extended(extended_fingers)
    }
}

/// Cross-hand gesture shared by every scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CombinedGesture {
    #[default]
    None,
    Rotate,
    PinchDrag,
    Zoom,
}

impl CombinedGesture {
    pub fn as_str(self) -> &'static str {
        match self {
            CombinedGesture::None => "none",
            CombinedGesture::Rotate => "rotate",
            CombinedGesture::PinchDrag => "pinch_drag",
            CombinedGesture::Zoom => "zoom",
        }
    }
}

impl fmt::Display for CombinedGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
