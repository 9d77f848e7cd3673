#[cfg(test)]
mod model_tests {
    use jiff::civil::date;

    use crate::models::{
        BirthHour, ChatMessage, ChatRole, DayPlan, EntryOrigin, QuickQuestion, RoadmapItem, Stats,
        WeeklyPlan,
    };

    #[test]
    fn test_placeholder_day_plan() {
        let day = DayPlan::placeholder(4);
        assert_eq!(day.day_index, 4);
        assert_eq!(day.title, "일일 계획 4");
        assert!(!day.description.is_empty());
        assert_eq!(day.origin, EntryOrigin::Placeholder);
        assert!(day.is_placeholder());
    }

    #[test]
    fn test_weekly_plan_pads_and_reindexes() {
        let entries = vec![
            DayPlan::parsed(9, "A", "a"),
            DayPlan::parsed(3, "B", "b"),
        ];
        let plan = WeeklyPlan::from_entries(entries, None);

        let indices: Vec<u8> = plan.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(plan.days[0].title, "A");
        assert_eq!(plan.days[1].title, "B");
        assert_eq!(plan.parsed_count(), 2);
        assert!(plan.days[2..].iter().all(DayPlan::is_placeholder));
    }

    #[test]
    fn test_weekly_plan_truncates_extra_entries() {
        let entries = (1..=9)
            .map(|i| DayPlan::parsed(i, format!("T{i}"), format!("D{i}")))
            .collect();
        let plan = WeeklyPlan::from_entries(entries, Some("extra".to_string()));

        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[6].title, "T7");
        assert_eq!(plan.explanation.as_deref(), Some("extra"));
    }

    #[test]
    fn test_weekly_plan_serde_roundtrip_keeps_origin() {
        let plan = WeeklyPlan::from_entries(vec![DayPlan::parsed(1, "걷기", "20분 산책")], None);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"origin\":\"placeholder\""));
        assert!(!json.contains("explanation"));

        let back: WeeklyPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_birth_hour_parsing() {
        assert_eq!("23-01시".parse::<BirthHour>().unwrap(), BirthHour::Ja);
        assert_eq!("07-09".parse::<BirthHour>().unwrap(), BirthHour::Jin);
        assert_eq!("모름".parse::<BirthHour>().unwrap(), BirthHour::Unknown);
        assert_eq!("Unknown".parse::<BirthHour>().unwrap(), BirthHour::Unknown);
        assert!("25-27시".parse::<BirthHour>().is_err());
    }

    #[test]
    fn test_birth_hour_branches() {
        assert_eq!(BirthHour::Ja.branch(), "자");
        assert_eq!(BirthHour::Hae.branch(), "해");
        assert_eq!(BirthHour::Unknown.branch(), "미정");
        for slot in BirthHour::ALL {
            assert_eq!(slot.as_str().parse::<BirthHour>().unwrap(), slot);
        }
    }

    #[test]
    fn test_birth_hour_serializes_as_label() {
        let json = serde_json::to_string(&BirthHour::Sa).unwrap();
        assert_eq!(json, "\"09-11시\"");
    }

    #[test]
    fn test_roadmap_item_progress() {
        assert_eq!(RoadmapItem::progress(0), 10);
        assert_eq!(RoadmapItem::progress(1), 27);
        assert_eq!(RoadmapItem::progress(5), 95);
        assert_eq!(RoadmapItem::progress(6), 12);
    }

    #[test]
    fn test_roadmap_item_days_since_added() {
        let item = RoadmapItem {
            question: "q".to_string(),
            answer: "a".to_string(),
            date_added: date(2025, 5, 31),
        };
        assert_eq!(item.days_since_added(date(2025, 6, 3)), 3);
        assert_eq!(item.days_since_added(date(2025, 5, 1)), 0);
    }

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::user("hi").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
        assert!(!ChatMessage::assistant("hello").added_to_roadmap);
    }

    #[test]
    fn test_quick_question_parsing() {
        assert_eq!("career".parse::<QuickQuestion>().unwrap(), QuickQuestion::Career);
        assert_eq!("스트레스".parse::<QuickQuestion>().unwrap(), QuickQuestion::Stress);
        assert!("weather".parse::<QuickQuestion>().is_err());
    }

    #[test]
    fn test_stats_pending() {
        let stats = Stats {
            total_tasks: 5,
            completed_tasks: 2,
            ongoing_roadmaps: 0,
            streak_days: 2,
        };
        assert_eq!(stats.pending_tasks(), 3);
    }
}
