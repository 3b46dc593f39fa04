/// Converts a duration to a frame count, truncating toward zero.
///
/// Gap and producer lengths are always derived this way, so `2.99s` at 25 fps is 74 frames,
/// not 75. Negative durations saturate to zero.
pub fn seconds_to_frames(seconds: f64, fps: u32) -> u64 {
    (seconds * fps as f64) as u64
}

/// Formats a frame offset as the `HH:MM:SS.mmm` string Kdenlive expects.
///
/// Hours, minutes and seconds are floored while the millisecond part is rounded to the
/// nearest integer.
pub fn format_time_from_frames(frames: u64, fps: u32) -> String {
    let total_seconds = frames as f64 / fps as f64;
    let whole_seconds = total_seconds.trunc();

    let hours = (total_seconds / 3600.0).floor() as u64;
    let minutes = ((total_seconds % 3600.0) / 60.0).floor() as u64;
    let seconds = (total_seconds % 60.0).floor() as u64;
    let milliseconds = ((total_seconds - whole_seconds) * 1000.0).round() as u64;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frames() {
        assert_eq!(format_time_from_frames(0, 25), "00:00:00.000");
    }

    #[test]
    fn test_one_minute() {
        assert_eq!(format_time_from_frames(1500, 25), "00:01:00.000");
    }

    #[test]
    fn test_sub_second_frames() {
        assert_eq!(format_time_from_frames(1, 25), "00:00:00.040");
        assert_eq!(format_time_from_frames(124, 25), "00:00:04.960");
        assert_eq!(format_time_from_frames(325, 25), "00:00:13.000");
    }

    #[test]
    fn test_hours_roll_over() {
        assert_eq!(format_time_from_frames(25 * 3600, 25), "01:00:00.000");
        assert_eq!(format_time_from_frames(25 * 3725 + 5, 25), "01:02:05.200");
    }

    #[test]
    fn test_seconds_to_frames_truncates() {
        assert_eq!(seconds_to_frames(5.0, 25), 125);
        assert_eq!(seconds_to_frames(2.99, 25), 74);
        assert_eq!(seconds_to_frames(0.5, 25), 12);
        assert_eq!(seconds_to_frames(-1.0, 25), 0);
    }
}
