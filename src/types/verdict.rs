/// Result of testing a marker position against the fence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainmentVerdict {
    Inside,
    Outside,
}

impl ContainmentVerdict {
    pub fn from_inside(inside: bool) -> Self {
        if inside {
            ContainmentVerdict::Inside
        } else {
            ContainmentVerdict::Outside
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, ContainmentVerdict::Inside)
    }

    /// User-facing alert text for this verdict
    pub fn message(&self) -> &'static str {
        match self {
            ContainmentVerdict::Inside => "You are inside the geo-fencing region!",
            ContainmentVerdict::Outside => "You are outside the geo-fencing region!",
        }
    }
}
