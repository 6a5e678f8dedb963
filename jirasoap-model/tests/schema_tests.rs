use jirasoap_model::{
    Attachment, Entity, EntitySchema, Integer, Issue, Priority, Scheme, Text, Version, WireTarget,
    slot,
};
use jirasoap_wire::Node;
use pretty_assertions::assert_eq;
use std::sync::LazyLock;

/// An entity whose value is the fragment's own text.
#[derive(Debug, Default, PartialEq)]
struct Label {
    text: Option<String>,
    weight: Option<i64>,
}

impl Entity for Label {
    fn schema() -> &'static EntitySchema<Self> {
        static SCHEMA: LazyLock<EntitySchema<Label>> = LazyLock::new(|| {
            EntitySchema::new("Label")
                .declare_content::<Text>("text", slot!(Label, text))
                .declare::<Integer>("weight", "weight", slot!(Label, weight))
        });
        &SCHEMA
    }
}

// ── Declaration order ────────────────────────────────────────────

#[test]
fn named_schema_starts_with_identity_fields() {
    let names: Vec<_> = Priority::schema().field_names().collect();
    assert_eq!(names, ["id", "name", "color", "icon", "description"]);
}

#[test]
fn version_fields_in_wire_order() {
    let tags: Vec<_> = Version::schema()
        .descriptors()
        .iter()
        .map(|d| d.wire_tag().unwrap())
        .collect();
    assert_eq!(
        tags,
        ["id", "name", "sequence", "released", "archived", "releaseDate"]
    );
}

#[test]
fn entity_name_is_recorded() {
    assert_eq!(Issue::schema().entity_name(), "Issue");
    assert_eq!(Scheme::schema().entity_name(), "Scheme");
}

// ── Aliases ──────────────────────────────────────────────────────

#[test]
fn alias_resolves_to_the_same_descriptor() {
    let schema = Attachment::schema();
    let by_alias = schema.descriptor("filename").unwrap();
    let by_name = schema.descriptor("file_name").unwrap();
    assert_eq!(by_alias.field_name(), "file_name");
    assert!(std::ptr::eq(by_alias, by_name));
    assert_eq!(schema.descriptor("content_type").unwrap().field_name(), "mime_type");
}

#[test]
fn aliases_do_not_add_descriptors() {
    let schema = Attachment::schema();
    let count = schema.descriptors().len();
    let distinct: std::collections::HashSet<_> = schema.field_names().collect();
    assert_eq!(count, distinct.len());
    assert_eq!(count, 8);
}

#[test]
#[should_panic(expected = "declared twice")]
fn duplicate_field_name_panics() {
    let _ = EntitySchema::<Label>::new("Label")
        .declare::<Text>("text", "a", slot!(Label, text))
        .declare::<Text>("text", "b", slot!(Label, text));
}

#[test]
#[should_panic(expected = "already taken")]
fn alias_clashing_with_field_panics() {
    let _ = EntitySchema::<Label>::new("Label")
        .declare::<Text>("text", "a", slot!(Label, text))
        .declare::<Integer>("weight", "w", slot!(Label, weight))
        .alias("text", "weight");
}

#[test]
#[should_panic(expected = "unknown field")]
fn alias_of_unknown_field_panics() {
    let _ = EntitySchema::<Label>::new("Label").alias("x", "missing");
}

// ── Descriptor shape ─────────────────────────────────────────────

#[test]
fn repeatable_descriptors_are_marked() {
    let schema = Issue::schema();
    assert!(schema.descriptor("affects_versions").unwrap().is_repeatable());
    assert!(!schema.descriptor("summary").unwrap().is_repeatable());
}

#[test]
fn content_descriptor_targets_own_text() {
    let schema = Label::schema();
    assert_eq!(schema.descriptor("text").unwrap().target(), WireTarget::Content);
    assert_eq!(
        schema.descriptor("weight").unwrap().target(),
        WireTarget::Element("weight")
    );
}

#[test]
fn is_set_tracks_storage() {
    let mut priority = Priority::default();
    let schema = Priority::schema();
    assert_eq!(schema.is_set(&priority, "icon"), Some(false));
    priority.icon = Some("http://jira/icons/major.gif".into());
    assert_eq!(schema.is_set(&priority, "icon"), Some(true));
    assert_eq!(schema.is_set(&priority, "nope"), None);
}

// ── Own-text fields ──────────────────────────────────────────────

#[test]
fn content_field_reads_fragment_text() {
    let node = Node::with_text("label", "urgent").child(Node::with_text("weight", "3"));
    let label = Label::from_fragment(&node).unwrap();
    assert_eq!(
        label,
        Label {
            text: Some("urgent".into()),
            weight: Some(3),
        }
    );
}

#[test]
fn content_field_round_trips() {
    let label = Label {
        text: Some("blocked".into()),
        weight: None,
    };
    let node = label.to_node("label");
    assert_eq!(node.to_string(), "<label>blocked</label>");
    assert_eq!(Label::from_fragment(&node).unwrap(), label);
}

#[test]
fn blank_content_reads_back_as_unset() {
    let label = Label {
        text: Some(String::new()),
        weight: Some(1),
    };
    let node = label.to_node("label");
    assert_eq!(node.to_string(), "<label><weight>1</weight></label>");
    assert_eq!(
        Label::from_fragment(&node).unwrap(),
        Label {
            text: None,
            weight: Some(1),
        }
    );
}

#[test]
fn blank_element_field_stays_blank() {
    let node = Node::new("p").child(Node::new("name"));
    let priority = Priority::from_fragment(&node).unwrap();
    assert_eq!(priority.name.as_deref(), Some(""));
}
