/// Duration applied to intro steps that don't set their own.
pub const INTRO_DEFAULT_DURATION: f32 = 0.6;

pub const MV_TITLE_SELECTOR: &str = "[data-mv=\"title\"]";
pub const MV_SUB_TEXT_SELECTOR: &str = ".mv__sub-text";
pub const MV_HOME_LINK_SELECTOR: &str = "[data-mv=\"homeLink\"]";
pub const MV_NOTE_LINK_SELECTOR: &str = "[data-mv=\"noteLink\"]";
pub const MV_GIT_LINK_SELECTOR: &str = "[data-mv=\"gitLink\"]";

/// One intro tween. `opacity`/`y` are end values, `None` leaves the property alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroStep {
    pub selector: &'static str,
    pub opacity: Option<f32>,
    pub y: Option<f32>,
    /// Start offset in seconds from the beginning of the timeline.
    pub at: f32,
    pub duration: Option<f32>,
    /// Delay between consecutive elements matched by the selector.
    pub stagger: f32,
}

pub const INTRO_STEPS: [IntroStep; 6] = [
    IntroStep {
        selector: crate::path::CANVAS_ANCHOR_SELECTOR,
        opacity: Some(1.0),
        y: None,
        at: 0.0,
        duration: Some(1.0),
        stagger: 0.0,
    },
    IntroStep {
        selector: MV_TITLE_SELECTOR,
        opacity: Some(1.0),
        y: Some(0.0),
        at: 1.0,
        duration: None,
        stagger: 0.0,
    },
    IntroStep {
        selector: MV_SUB_TEXT_SELECTOR,
        opacity: Some(1.0),
        y: Some(0.0),
        at: 1.5,
        duration: None,
        stagger: 0.05,
    },
    IntroStep {
        selector: MV_HOME_LINK_SELECTOR,
        opacity: None,
        y: Some(0.0),
        at: 2.5,
        duration: None,
        stagger: 0.0,
    },
    IntroStep {
        selector: MV_NOTE_LINK_SELECTOR,
        opacity: None,
        y: Some(0.0),
        at: 2.5,
        duration: None,
        stagger: 0.0,
    },
    IntroStep {
        selector: MV_GIT_LINK_SELECTOR,
        opacity: None,
        y: Some(0.0),
        at: 2.5,
        duration: None,
        stagger: 0.0,
    },
];
