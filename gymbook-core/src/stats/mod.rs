//! Pure helpers deriving display values from stored records.

mod progress;
mod units;

pub use progress::{
    ChartMode, PersonalRecord, ProgressPoint, best_for_lift, calculate_one_rep_max,
    exercise_names, exercise_volume, group_by_month, personal_records, progress_rows,
    workout_volume,
};
pub use units::{
    CM_PER_INCH, KG_PER_STONE, LBS_PER_KG, LengthUnit, WeightUnit, convert_length,
    convert_weight,
};
