use crate::money::Rupees;
use chrono::NaiveDate;
use rand::Rng;

const FULL_SPINS: f64 = 6.0;
/// Share of a segment the pointer may land away from its centre.
const LANDING_JITTER: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub value: Rupees,
    pub label: &'static str,
}

const fn segment(paisa: i64, label: &'static str) -> Segment {
    Segment {
        value: Rupees::from_paisa(paisa),
        label,
    }
}

pub const DAILY_SEGMENTS: [Segment; 8] = [
    segment(5_000, "50"),
    segment(1_000, "10"),
    segment(10_000, "100"),
    segment(500, "5"),
    segment(2_000, "20"),
    segment(1, "0.01"),
    segment(50_000, "500"),
    segment(100, "1"),
];

pub const BOUGHT_SEGMENTS: [Segment; 8] = [
    segment(1_000, "10"),
    segment(50, "0.5"),
    segment(500, "5"),
    segment(100, "1"),
    segment(200, "2"),
    segment(0, "Oops!"),
    segment(800, "8"),
    segment(300, "3"),
];

/// The free daily spin always lands on the 0.01 segment.
pub const DAILY_PRIZE: Rupees = Rupees::from_paisa(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelKind {
    Daily,
    Bought,
}

impl WheelKind {
    pub fn segments(self) -> &'static [Segment] {
        match self {
            WheelKind::Daily => &DAILY_SEGMENTS,
            WheelKind::Bought => &BOUGHT_SEGMENTS,
        }
    }
}

pub fn fixed_daily_win_index() -> usize {
    DAILY_SEGMENTS
        .iter()
        .position(|s| s.value == DAILY_PRIZE)
        .unwrap_or_default()
}

/// Which wheel to show: the daily one until today's free spin is used.
pub fn wheel_for(last_spin: Option<NaiveDate>, today: NaiveDate) -> WheelKind {
    if daily_spin_available(last_spin, today) {
        WheelKind::Daily
    } else {
        WheelKind::Bought
    }
}

pub fn daily_spin_available(last_spin: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_spin != Some(today)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinOutcome {
    pub kind: WheelKind,
    pub index: usize,
    pub prize: Rupees,
    /// Absolute wheel rotation, in degrees, once the animation settles.
    pub rotation: f64,
}

impl SpinOutcome {
    pub fn segment(&self) -> Segment {
        self.kind.segments()[self.index]
    }

    pub fn is_low_prize(&self, threshold: Rupees) -> bool {
        self.prize < threshold
    }

    pub fn credits(&self) -> bool {
        self.prize.is_positive()
    }
}

/// Picks winning segments and keeps the wheel's accumulated rotation.
#[derive(Clone, Debug, Default)]
pub struct WheelRandomizer {
    rotation: f64,
}

impl WheelRandomizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn spin<R: Rng + ?Sized>(&mut self, kind: WheelKind, rng: &mut R) -> SpinOutcome {
        let segments = kind.segments();
        let index = match kind {
            WheelKind::Daily => fixed_daily_win_index(),
            WheelKind::Bought => rng.random_range(0..segments.len()),
        };
        let jitter = rng.random::<f64>() - 0.5;
        self.rotation = settle_rotation(self.rotation, index, segments.len(), jitter);
        SpinOutcome {
            kind,
            index,
            prize: segments[index].value,
            rotation: self.rotation,
        }
    }
}

/// `jitter` is in `[-0.5, 0.5)`. Each spin starts from the last whole turn of
/// `current`, so the result always rests on segment `index`.
pub fn settle_rotation(current: f64, index: usize, segment_count: usize, jitter: f64) -> f64 {
    let segment_angle = 360.0 / segment_count as f64;
    let offset = jitter * segment_angle * LANDING_JITTER;
    let target = 360.0 - index as f64 * segment_angle - segment_angle / 2.0 + offset;
    let whole_turns = current - current.rem_euclid(360.0);
    whole_turns + 360.0 * FULL_SPINS + target
}

/// Segment under the pointer for a given rotation.
pub fn segment_at(rotation: f64, segment_count: usize) -> usize {
    let segment_angle = 360.0 / segment_count as f64;
    let normalized = (360.0 - rotation.rem_euclid(360.0)).rem_euclid(360.0);
    (normalized / segment_angle).floor() as usize % segment_count
}
