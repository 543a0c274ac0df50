//! The cat's encouragement lines.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const QUOTES_ZH: &[&str] = &[
    "喵～好棒，继续写！",
    "(*´∀`)♡ 再来一句！",
    "你今天状态很好喵！",
    "伸个懒腰，然后继续～",
    "FocusCat 为你守护专注 ✨",
    "喝口水，眼睛休息十秒喵～",
    "先写不完美，也很棒喵！",
];

const QUOTES_EN: &[&str] = &[
    "Meow~ you're doing great!",
    "One more line, you got this!",
    "Looking sharp today, human 🐾",
    "Stretch a bit and keep going!",
    "FocusCat is guarding your focus ✨",
    "Sip some water and relax your eyes.",
    "It's okay to write imperfectly first!",
];

/// Seconds between automatic quote changes.
pub const ROTATE_MIN_SECS: u64 = 60;
pub const ROTATE_MAX_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteLang {
    #[default]
    Zh,
    En,
}

impl QuoteLang {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteLang::Zh => "中文",
            QuoteLang::En => "English",
        }
    }

    fn pool(&self) -> &'static [&'static str] {
        match self {
            QuoteLang::Zh => QUOTES_ZH,
            QuoteLang::En => QUOTES_EN,
        }
    }
}

/// Moments the cat comments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Greeting,
    FocusStart,
    FocusPause,
    FocusReset,
    FocusDone,
}

pub fn moment_line(moment: Moment, lang: QuoteLang) -> &'static str {
    match (moment, lang) {
        (Moment::Greeting, QuoteLang::Zh) => "喵～准备开始写作了吗？",
        (Moment::Greeting, QuoteLang::En) => "Meow~ ready to write?",
        (Moment::FocusStart, QuoteLang::Zh) => "专注开始喵～ 🐾",
        (Moment::FocusStart, QuoteLang::En) => "Focus mode: meow on! 🐾",
        (Moment::FocusPause, QuoteLang::Zh) => "先歇一歇，喝口水喵～",
        (Moment::FocusPause, QuoteLang::En) => "Take a sip and a breath~",
        (Moment::FocusReset, QuoteLang::Zh) => "重置完成，随时开始~",
        (Moment::FocusReset, QuoteLang::En) => "Reset done. Ready anytime!",
        (Moment::FocusDone, QuoteLang::Zh) => "时间到啦！伸个懒腰再回来喵～ 😺",
        (Moment::FocusDone, QuoteLang::En) => "Time! Stretch and come back meow~ 😺",
    }
}

pub fn random_quote<R: Rng>(lang: QuoteLang, rng: &mut R) -> &'static str {
    lang.pool().choose(rng).copied().unwrap_or_default()
}

/// A random delay before the next automatic quote.
pub fn rotation_delay<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_secs(rng.gen_range(ROTATE_MIN_SECS..=ROTATE_MAX_SECS))
}

/// Current quote plus the countdown to the next automatic change.
#[derive(Debug, Clone)]
pub struct QuoteBoard {
    lang: QuoteLang,
    current: String,
    until_rotation: Duration,
}

impl QuoteBoard {
    pub fn new(lang: QuoteLang) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            lang,
            current: random_quote(lang, &mut rng).to_string(),
            until_rotation: rotation_delay(&mut rng),
        }
    }

    pub fn lang(&self) -> QuoteLang {
        self.lang
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn until_rotation(&self) -> Duration {
        self.until_rotation
    }

    /// Switch language, show a fresh quote and restart the rotation.
    pub fn set_lang(&mut self, lang: QuoteLang) {
        self.lang = lang;
        self.shuffle();
    }

    /// Show a new random quote and restart the rotation countdown.
    pub fn shuffle(&mut self) {
        let mut rng = rand::thread_rng();
        self.current = random_quote(self.lang, &mut rng).to_string();
        self.until_rotation = rotation_delay(&mut rng);
    }

    /// Show the line for an event; the rotation continues as scheduled.
    pub fn say(&mut self, moment: Moment) {
        self.current = moment_line(moment, self.lang).to_string();
    }

    /// Count down; returns true when a new quote was shown.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if dt < self.until_rotation {
            self.until_rotation -= dt;
            return false;
        }
        self.shuffle();
        true
    }
}
