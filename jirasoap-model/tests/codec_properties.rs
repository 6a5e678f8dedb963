//! Property-based tests for the schema-driven codec.
//!
//! - Collection decoding keeps source order for any number of items
//! - Text, integer and boolean fields survive encode → decode
//! - Unset fields never reach the wire

use jirasoap_model::{Entity, FieldValue, Issue, Priority, Version, codec};
use jirasoap_wire::Node;
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 <>&#_.-]{0,40}").unwrap()
}

fn opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(text_strategy())
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    (opt_text(), opt_text(), opt_text(), opt_text(), opt_text()).prop_map(
        |(id, name, color, icon, description)| Priority {
            id,
            name,
            color,
            icon,
            description,
        },
    )
}

proptest! {
    #[test]
    fn collection_order_is_preserved(ids in prop::collection::vec("[0-9]{1,6}", 0..20)) {
        let container = Node::new("getPrioritiesReturn").children_from(ids.iter().map(|id| {
            Node::new("getPrioritiesReturn").child(Node::with_text("id", id.as_str()))
        }));
        let decoded: Vec<Priority> = codec::decode_collection(&container, "getPrioritiesReturn").unwrap();
        let decoded_ids: Vec<String> = decoded.into_iter().filter_map(|p| p.id).collect();
        prop_assert_eq!(decoded_ids, ids);
    }

    #[test]
    fn priority_round_trips(priority in priority_strategy()) {
        let decoded = Priority::from_fragment(&priority.to_node("in1")).unwrap();
        prop_assert_eq!(decoded, priority);
    }

    #[test]
    fn version_scalars_round_trip(
        sequence in prop::option::of(any::<i64>()),
        released in prop::option::of(any::<bool>()),
        archived in prop::option::of(any::<bool>()),
    ) {
        let version = Version { sequence, released, archived, ..Default::default() };
        let decoded = Version::from_fragment(&version.to_node("in2")).unwrap();
        prop_assert_eq!(decoded, version);
    }

    #[test]
    fn unset_fields_never_reach_the_wire(summary in opt_text(), votes in prop::option::of(0i64..1000)) {
        let issue = Issue { summary: summary.clone(), votes, ..Default::default() };
        let node = issue.to_node("in1");
        prop_assert_eq!(node.first_child("summary").is_some(), summary.is_some());
        prop_assert_eq!(node.first_child("votes").is_some(), votes.is_some());
        prop_assert_eq!(node.children().len(), summary.iter().count() + votes.iter().count());
    }

    #[test]
    fn field_values_keep_value_order(values in prop::collection::vec(text_strategy(), 0..8)) {
        let field = FieldValue::new("labels", values.clone());
        let decoded = FieldValue::from_fragment(&field.to_node(FieldValue::ELEMENT)).unwrap();
        prop_assert_eq!(decoded.values, Some(values));
    }
}
