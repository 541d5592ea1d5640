/// Smallest year accepted by the year field
pub const MIN_YEAR: i32 = 1;
/// Largest year accepted by the year field (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a week
pub const DAYS_PER_WEEK: usize = 7;
/// Rows shown by the month grid, enough for any month length and alignment
pub const GRID_ROWS: usize = 6;
/// Cells in the month grid
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_ROWS;

/// First hour of the afternoon on a 24-hour clock
pub const NOON: u32 = 12;
/// Hours in half a day
pub const HOURS_PER_MERIDIEM: u32 = 12;

/// Pause after the last keystroke before a partial field is committed
pub const COMMIT_DELAY_MS: u64 = 1_000;
/// Delay between pressing a paging button and the first repeat
pub const PAGING_INITIAL_DELAY_MS: u64 = 500;
/// Repeat interval while a paging button is held
pub const PAGING_INTERVAL_MS: u64 = 250;
/// Hold duration after which paging switches to the fast interval
pub const PAGING_ACCELERATE_AFTER_MS: u64 = 4_000;
/// Repeat interval once paging has accelerated
pub const PAGING_FAST_INTERVAL_MS: u64 = 75;
/// Minimum spacing between drag selections that leave the displayed month
pub const DRAG_THROTTLE_MS: u64 = 800;

/// Character a keyboard delivers for the tab key
pub const TAB: char = '\t';
