//! # Integration Tests
//!
//! Cross-crate behaviour of the dispatcher over real buffers, sources and
//! datasets.
//!
//! Covers:
//! - Routing identity and composite handling per capability
//! - Group lifecycle sequences over whole streams
//! - Fan-out order and fail-fast
//! - Dataset file -> buffer -> traversal

#[cfg(test)]
mod support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use contracts::{Changeset, Node, Relation, Way};
    use dispatcher::{Handler, Lifecycle};

    pub type EventLog = Rc<RefCell<Vec<String>>>;

    pub fn event_log() -> EventLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    /// Handler writing every call as `"<name>:<event>"`
    pub struct Recorder {
        name: &'static str,
        log: EventLog,
        /// Addresses of the records each entity method received
        pub seen: Vec<usize>,
    }

    impl Recorder {
        pub fn new(name: &'static str, log: &EventLog) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                seen: Vec::new(),
            }
        }

        fn push(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, event));
        }

        fn entity<T>(&mut self, event: &str, record: &T) {
            self.seen.push(record as *const T as usize);
            self.push(event);
        }
    }

    impl Lifecycle for Recorder {
        fn init(&mut self) {
            self.push("init");
        }
        fn before_nodes(&mut self) {
            self.push("before_nodes");
        }
        fn after_nodes(&mut self) {
            self.push("after_nodes");
        }
        fn before_ways(&mut self) {
            self.push("before_ways");
        }
        fn after_ways(&mut self) {
            self.push("after_ways");
        }
        fn before_relations(&mut self) {
            self.push("before_relations");
        }
        fn after_relations(&mut self) {
            self.push("after_relations");
        }
        fn before_changesets(&mut self) {
            self.push("before_changesets");
        }
        fn after_changesets(&mut self) {
            self.push("after_changesets");
        }
        fn done(&mut self) {
            self.push("done");
        }
    }

    impl Handler for Recorder {
        fn node(&mut self, node: &Node) {
            self.entity("node", node);
        }
        fn way(&mut self, way: &Way) {
            self.entity("way", way);
        }
        fn relation(&mut self, relation: &Relation) {
            self.entity("relation", relation);
        }
        fn changeset(&mut self, changeset: &Changeset) {
            self.entity("changeset", changeset);
        }
    }

    pub fn events(log: &EventLog) -> Vec<String> {
        log.borrow().clone()
    }
}

#[cfg(test)]
mod dispatch_tests {
    use contracts::{
        Changeset, Item, ItemRef, ItemType, Location, Node, Relation, RelationMemberList,
        TagList, Way, WayNodeList,
    };
    use dispatcher::{dispatch_item, dispatch_object, DispatchError};

    use crate::support::{event_log, events, Recorder};

    fn address<T>(record: &T) -> usize {
        record as *const T as usize
    }

    #[test]
    fn test_handler_receives_same_record_once() {
        let items: Vec<Item> = vec![
            Node::new(1, Location::new(1.0, 2.0)).into(),
            Way::new(2, [1, 3]).into(),
            Relation::new(3).into(),
            Changeset::new(4, "u").into(),
        ];

        for item in &items {
            let log = event_log();
            let mut handler = Recorder::new("h", &log);
            dispatch_item(item, &mut handler).unwrap();

            let expected = match item {
                Item::Node(node) => address(node),
                Item::Way(way) => address(way),
                Item::Relation(relation) => address(relation),
                Item::Changeset(changeset) => address(changeset),
                other => panic!("not an entity: {other:?}"),
            };
            assert_eq!(handler.seen, vec![expected]);
            assert_eq!(events(&log), vec![format!("h:{}", item.item_type())]);
        }
    }

    #[test]
    fn test_composites_callable_yes_handler_no() {
        let composites: Vec<Item> = vec![
            TagList::new().into(),
            WayNodeList::new().into(),
            RelationMemberList::new().into(),
            RelationMemberList::with_full_members().into(),
        ];

        for item in &composites {
            let mut routed = Vec::new();
            let mut callable = |view: ItemRef<'_>| routed.push(view.item_type());
            dispatch_item(item, &mut callable).unwrap();
            assert_eq!(routed, vec![item.item_type()]);

            let log = event_log();
            let mut handler = Recorder::new("h", &log);
            let err = dispatch_item(item, &mut handler).unwrap_err();
            assert!(matches!(err, DispatchError::UnknownType { item_type } if item_type == item.item_type()));
            assert!(events(&log).is_empty());
        }
    }

    #[test]
    fn test_member_list_tags_share_one_arm() {
        struct MemberLists(Vec<bool>);
        impl dispatcher::Callable for MemberLists {
            fn call(&mut self, item: ItemRef<'_>) {
                match item {
                    ItemRef::RelationMemberList(list) => self.0.push(list.full_members),
                    _ => panic!("wrong arm"),
                }
            }
        }

        let mut visitor = MemberLists(Vec::new());
        dispatch_item(&RelationMemberList::new().into(), &mut visitor).unwrap();
        dispatch_item(&RelationMemberList::with_full_members().into(), &mut visitor).unwrap();
        assert_eq!(visitor.0, vec![false, true]);
    }

    #[test]
    fn test_object_path_only_holds_node_way_relation() {
        let items: Vec<Item> = vec![
            Node::new(1, Location::default()).into(),
            Way::new(2, [1]).into(),
            Relation::new(3).into(),
            Changeset::new(4, "u").into(),
            TagList::new().into(),
        ];

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        for item in &items {
            if let Some(object) = item.as_object() {
                assert!(object.item_type().is_object());
                dispatch_object(object, &mut handler);
            }
        }
        assert_eq!(events(&log), vec!["h:node", "h:way", "h:relation"]);
    }

    #[test]
    fn test_raw_tag_is_unknown_for_both_capabilities() {
        let item: Item = contracts::RawItem::new(ItemType::Area, vec![0u8])
            .unwrap()
            .into();

        let mut callable = |_view: ItemRef<'_>| panic!("raw records have no arm");
        assert!(dispatch_item(&item, &mut callable).is_err());

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        let err = dispatch_item(&item, &mut handler).unwrap_err();
        assert_eq!(err.item_type(), Some(ItemType::Area));
    }
}

#[cfg(test)]
mod stream_tests {
    use contracts::{Buffer, Item, Location, Node, Relation, VecSource, Way};
    use dispatcher::{apply, apply_iter, apply_source};

    use crate::support::{event_log, events, Recorder};

    #[test]
    fn test_empty_stream_init_done_only() {
        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        let summary = apply(&Buffer::new(), &mut handler).unwrap();

        assert_eq!(events(&log), vec!["h:init", "h:done"]);
        assert_eq!(summary.items, 0);
        assert_eq!(summary.groups, 0);
    }

    #[test]
    fn test_lifecycle_sequence() {
        let buffer: Buffer = vec![
            Item::from(Node::new(1, Location::default())),
            Item::from(Node::new(2, Location::default())),
            Item::from(Way::new(3, [1, 2])),
            Item::from(Relation::new(4)),
            Item::from(Relation::new(5)),
        ]
        .into();

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        let summary = apply(&buffer, &mut handler).unwrap();

        let expected = [
            "init",
            "before_nodes",
            "node",
            "node",
            "after_nodes",
            "before_ways",
            "way",
            "after_ways",
            "before_relations",
            "relation",
            "relation",
            "after_relations",
            "done",
        ];
        assert_eq!(
            events(&log),
            expected.iter().map(|e| format!("h:{e}")).collect::<Vec<_>>()
        );
        assert_eq!(summary.items, 5);
        assert_eq!(summary.groups, 3);
    }

    #[test]
    fn test_non_contiguous_runs_are_separate_groups() {
        let buffer: Buffer = vec![
            Item::from(Node::new(1, Location::default())),
            Item::from(Way::new(2, [1])),
            Item::from(Node::new(3, Location::default())),
        ]
        .into();

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        apply(&buffer, &mut handler).unwrap();

        let before_nodes = events(&log)
            .iter()
            .filter(|e| *e == "h:before_nodes")
            .count();
        assert_eq!(before_nodes, 2);
    }

    #[test]
    fn test_source_groups_span_buffers() {
        let first: Buffer = vec![Item::from(Node::new(1, Location::default()))].into();
        let second: Buffer = vec![
            Item::from(Node::new(2, Location::default())),
            Item::from(Way::new(3, [1, 2])),
        ]
        .into();
        let mut source = VecSource::new("split", vec![first, second]);

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        let summary = apply_source(&mut source, &mut handler).unwrap();

        assert_eq!(summary.items, 3);
        assert_eq!(summary.groups, 2);
        assert_eq!(
            events(&log),
            vec![
                "h:init",
                "h:before_nodes",
                "h:node",
                "h:node",
                "h:after_nodes",
                "h:before_ways",
                "h:way",
                "h:after_ways",
                "h:done"
            ]
        );
    }

    #[test]
    fn test_early_stop_skips_done() {
        let buffer: Buffer = vec![
            Item::from(Node::new(1, Location::default())),
            Item::from(Way::new(2, [1])),
        ]
        .into();

        let log = event_log();
        let mut handler = Recorder::new("h", &log);
        apply_iter(buffer.iter().take(1), &mut handler).unwrap();

        // Truncating the range is the caller's choice; the shorter stream
        // still closes normally.
        assert_eq!(
            events(&log),
            vec!["h:init", "h:before_nodes", "h:node", "h:after_nodes", "h:done"]
        );
    }
}

#[cfg(test)]
mod fanout_tests {
    use contracts::{Buffer, Item, ItemRef, Location, Node, TagList, Way};
    use dispatcher::apply;

    use crate::support::{event_log, events, Recorder};

    #[test]
    fn test_fanout_order_records_and_transitions() {
        let buffer: Buffer = vec![
            Item::from(Node::new(1, Location::default())),
            Item::from(Way::new(2, [1])),
        ]
        .into();

        let log = event_log();
        let mut a = Recorder::new("A", &log);
        let mut b = Recorder::new("B", &log);
        let mut c = Recorder::new("C", &log);
        apply(&buffer, (&mut a, &mut b, &mut c)).unwrap();

        let steps = [
            "init",
            "before_nodes",
            "node",
            "after_nodes",
            "before_ways",
            "way",
            "after_ways",
            "done",
        ];
        let log = events(&log);
        // Each transition fires two hooks per visitor, each record one.
        let mut expected = Vec::new();
        let mut i = 0;
        while i < steps.len() {
            let width = if steps[i] == "node" || steps[i] == "way" { 1 } else { 2 };
            for name in ["A", "B", "C"] {
                for step in &steps[i..i + width] {
                    expected.push(format!("{name}:{step}"));
                }
            }
            i += width;
        }
        assert_eq!(log, expected);
    }

    #[test]
    fn test_fail_fast_stops_later_visitors_and_records() {
        let buffer: Buffer = vec![
            Item::from(Node::new(1, Location::default())),
            Item::from(TagList::new()),
            Item::from(Node::new(2, Location::default())),
        ]
        .into();

        let log = event_log();
        let mut a = |_item: ItemRef<'_>| {};
        let mut b = Recorder::new("B", &log);
        let mut c = Recorder::new("C", &log);
        let err = apply(&buffer, (&mut a, &mut b, &mut c)).unwrap_err();

        assert_eq!(err.item_type(), Some(contracts::ItemType::TagList));
        let log = events(&log);
        assert!(!log.iter().any(|e| e == "C:done" || e == "B:done"));
        // The node group closed, then B failed on the tag list before C ran.
        assert_eq!(c.seen.len(), 1);
        assert!(log.last().is_some_and(|e| e == "C:after_nodes"));
    }

    #[test]
    fn test_callable_and_handler_mixed() {
        let buffer: Buffer = vec![Item::from(Node::new(1, Location::default()))].into();

        let log = event_log();
        let seen = std::cell::Cell::new(0);
        let mut counter = |_item: ItemRef<'_>| seen.set(seen.get() + 1);
        let mut handler = Recorder::new("H", &log);
        apply(&buffer, (&mut counter, &mut handler)).unwrap();

        assert_eq!(seen.get(), 1);
        assert_eq!(events(&log).len(), 5);
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, DatasetLoader};
    use contracts::{ItemType, Node, ObjectMut};
    use dispatcher::{
        apply, apply_mut, dispatch_objects_mut, CountHandler, HandlerMut, Lifecycle, LogHandler,
    };
    use observability::{record_item_counts, CountsAggregator};

    const DATASET: &str = r#"
[[items]]
type = "node"
id = 1
location = { lon = 13.40, lat = 52.52 }

[[items]]
type = "node"
id = 2
location = { lon = 13.41, lat = 52.53 }

[[items]]
type = "way"
id = 10
nodes = [{ ref = 1 }, { ref = 2 }]
tags = [{ key = "highway", value = "residential" }]

[[items]]
type = "changeset"
id = 99
user = "mapper"
num_changes = 3
"#;

    /// Bumps versions and tags every node
    #[derive(Default)]
    struct Touch {
        nodes: u32,
    }

    impl Lifecycle for Touch {}

    impl HandlerMut for Touch {
        fn node(&mut self, node: &mut Node) {
            node.version += 1;
            node.tags.push("touched", "yes");
            self.nodes += 1;
        }
    }

    #[test]
    fn test_dataset_to_traversal() {
        let buffer = DatasetLoader::load_from_str(DATASET, ConfigFormat::Toml).unwrap();

        let mut counter = CountHandler::new();
        let mut log = LogHandler::new("e2e");
        let summary = apply(&buffer, (&mut counter, &mut log)).unwrap();

        let counts = counter.counts();
        assert_eq!(counts.nodes, 2);
        assert_eq!(counts.ways, 1);
        assert_eq!(counts.changesets, 1);
        assert_eq!(counts.groups, 3);
        assert_eq!(summary.groups, 3);
        assert_eq!(log.entities(), 4);

        record_item_counts(counts);
        let mut aggregator = CountsAggregator::new();
        aggregator.update(counts);
        assert_eq!(aggregator.summary().totals.total(), 4);
    }

    #[test]
    fn test_mutation_survives_serialization() {
        let mut buffer = DatasetLoader::load_from_str(DATASET, ConfigFormat::Toml).unwrap();

        let mut touch = Touch::default();
        let mut counter = CountHandler::new();
        apply_mut(&mut buffer, (&mut touch, &mut counter)).unwrap();
        assert_eq!(touch.nodes, 2);
        assert_eq!(counter.runs(), 1);

        let json = DatasetLoader::to_json(&buffer).unwrap();
        let reloaded = DatasetLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(reloaded, buffer);
        assert!(json.contains("\"touched\""));
    }

    #[test]
    fn test_object_fanout_on_loaded_items() {
        let mut buffer = DatasetLoader::load_from_str(DATASET, ConfigFormat::Toml).unwrap();

        let mut touch = Touch::default();
        for item in buffer.iter_mut() {
            match item.as_object_mut() {
                Some(object @ ObjectMut::Node(_)) => dispatch_objects_mut(object, &mut touch),
                _ => {}
            }
        }
        assert_eq!(touch.nodes, 2);
        assert_eq!(
            buffer.item_types().collect::<Vec<_>>(),
            vec![
                ItemType::Node,
                ItemType::Node,
                ItemType::Way,
                ItemType::Changeset
            ]
        );
    }
}
