//! 排课冲突检查
//!
//! 冲突按星期循环判断，不涉及具体日期。时间区间为半开区间，首尾相接不算重叠。

use crate::models::courses::{
    ClassSchedule, ScheduleCheckResponse, ScheduleConflict, ScheduleInput, ScheduleListItem,
};
use crate::utils::validate::parse_clock_time;

/// 两个 `HH:MM` 区间是否重叠；无法解析的输入视为不重叠
pub fn overlaps(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> bool {
    match (
        parse_clock_time(start_a),
        parse_clock_time(end_a),
        parse_clock_time(start_b),
        parse_clock_time(end_b),
    ) {
        (Some(sa), Some(ea), Some(sb), Some(eb)) => sa < eb && ea > sb,
        _ => false,
    }
}

/// 教室名去掉首尾空白并转小写，空名视为没有教室
pub fn normalize_room(room: Option<&str>) -> Option<String> {
    room.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_lowercase)
}

/// 两个排课是否使用同一间教室；没有教室的排课不会冲突
pub fn same_room(a: Option<&str>, b: Option<&str>) -> bool {
    match (normalize_room(a), normalize_room(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn collides(proposed: &ScheduleInput, existing: &ClassSchedule) -> bool {
    proposed.day_of_week == existing.day_of_week
        && overlaps(
            &proposed.start_time,
            &proposed.end_time,
            &existing.start_time,
            &existing.end_time,
        )
}

fn conflict_from(item: &ScheduleListItem) -> ScheduleConflict {
    ScheduleConflict {
        course_id: item.schedule.course_id,
        course_name: item.course_name.clone(),
        day_of_week: item.schedule.day_of_week,
        start_time: item.schedule.start_time.clone(),
        end_time: item.schedule.end_time.clone(),
        room: item.schedule.room.clone(),
    }
}

fn push_unique(list: &mut Vec<ScheduleConflict>, conflict: ScheduleConflict) {
    if !list.contains(&conflict) {
        list.push(conflict);
    }
}

/// 检查一组提议排课
///
/// - `course_id` 为 `None` 表示课程尚未创建，已有排课全部属于其他课程
/// - `existing` 是同一商户的全部排课（附课程名）
/// - `exclude_schedule_id` 为正在修改的排课，不参与比较
pub fn check_schedules(
    course_id: Option<i64>,
    course_name: &str,
    proposed: &[ScheduleInput],
    existing: &[ScheduleListItem],
    exclude_schedule_id: Option<i64>,
) -> ScheduleCheckResponse {
    let mut duplicates = Vec::new();
    let mut room_conflicts = Vec::new();

    let candidates = existing
        .iter()
        .filter(|item| Some(item.schedule.id) != exclude_schedule_id);

    for item in candidates {
        let same_course = Some(item.schedule.course_id) == course_id;
        for input in proposed {
            if !collides(input, &item.schedule) {
                continue;
            }
            if same_course {
                push_unique(&mut duplicates, conflict_from(item));
            } else if same_room(input.room.as_deref(), item.schedule.room.as_deref()) {
                push_unique(&mut room_conflicts, conflict_from(item));
            }
        }
    }

    // 同一批提议之间也按同课程规则检查
    for (i, a) in proposed.iter().enumerate() {
        for b in &proposed[i + 1..] {
            if a.day_of_week == b.day_of_week
                && overlaps(&a.start_time, &a.end_time, &b.start_time, &b.end_time)
            {
                push_unique(
                    &mut duplicates,
                    ScheduleConflict {
                        course_id: course_id.unwrap_or_default(),
                        course_name: course_name.to_string(),
                        day_of_week: b.day_of_week,
                        start_time: b.start_time.clone(),
                        end_time: b.end_time.clone(),
                        room: b.room.clone(),
                    },
                );
            }
        }
    }

    ScheduleCheckResponse {
        has_conflicts: !duplicates.is_empty() || !room_conflicts.is_empty(),
        duplicates,
        room_conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(day: i32, start: &str, end: &str, room: Option<&str>) -> ScheduleInput {
        ScheduleInput {
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: room.map(str::to_string),
        }
    }

    fn existing(
        id: i64,
        course_id: i64,
        day: i32,
        start: &str,
        end: &str,
        room: Option<&str>,
    ) -> ScheduleListItem {
        ScheduleListItem {
            schedule: ClassSchedule {
                id,
                business_id: 1,
                course_id,
                day_of_week: day,
                start_time: start.to_string(),
                end_time: end.to_string(),
                room: room.map(str::to_string),
                created_at: chrono::Utc::now(),
            },
            course_name: format!("Course {course_id}"),
        }
    }

    #[test]
    fn test_overlaps() {
        assert!(overlaps("09:00", "10:00", "09:30", "11:00"));
        assert!(!overlaps("09:00", "10:00", "10:00", "11:00"));
        assert!(overlaps("09:00", "12:00", "10:00", "11:00"));
        assert!(!overlaps("09:00", "10:00", "bad", "11:00"));
    }

    #[test]
    fn test_room_matching() {
        assert!(same_room(Some(" Room A "), Some("room a")));
        assert!(!same_room(None, Some("Room A")));
        assert!(!same_room(Some(""), Some("")));
        assert!(!same_room(Some("A"), Some("B")));
    }

    #[test]
    fn test_same_course_duplicate() {
        let existing = vec![existing(1, 10, 1, "09:00", "10:00", None)];
        let result = check_schedules(
            Some(10),
            "Piano",
            &[input(1, "09:30", "10:30", None)],
            &existing,
            None,
        );
        assert!(result.has_conflicts);
        assert_eq!(result.duplicates.len(), 1);
        assert!(result.room_conflicts.is_empty());
    }

    #[test]
    fn test_update_excludes_itself() {
        let existing = vec![existing(1, 10, 1, "09:00", "10:00", Some("A"))];
        let result = check_schedules(
            Some(10),
            "Piano",
            &[input(1, "09:15", "10:15", Some("A"))],
            &existing,
            Some(1),
        );
        assert!(!result.has_conflicts);
    }

    #[test]
    fn test_room_conflict_only_with_same_room_and_day() {
        let existing = vec![
            existing(1, 20, 2, "09:00", "10:00", Some("Room A")),
            existing(2, 21, 2, "09:00", "10:00", None),
            existing(3, 22, 3, "09:00", "10:00", Some("Room A")),
            existing(4, 23, 2, "09:00", "10:00", Some("Room B")),
        ];
        let result = check_schedules(
            None,
            "New",
            &[input(2, "09:30", "10:30", Some("room a"))],
            &existing,
            None,
        );
        assert!(result.duplicates.is_empty());
        assert_eq!(result.room_conflicts.len(), 1);
        assert_eq!(result.room_conflicts[0].course_id, 20);
        assert_eq!(result.room_conflicts[0].course_name, "Course 20");
    }

    #[test]
    fn test_batch_checked_against_itself() {
        let result = check_schedules(
            None,
            "New",
            &[
                input(4, "09:00", "10:00", None),
                input(4, "09:30", "10:30", None),
                input(5, "09:00", "10:00", None),
            ],
            &[],
            None,
        );
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.duplicates[0].start_time, "09:30");
    }
}
