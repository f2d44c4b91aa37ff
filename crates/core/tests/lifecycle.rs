use anyhow::{Context, bail};
use ironclad_core::{Attributes, Entity, EntityError, entity};
use proptest::prelude::*;
use serde_json::json;

entity! {
    /// Address label used by the lifecycle tests.
    pub struct Label: LabelDraft {
        attributes {
            /// Printed text.
            text: String,
            copies: u16,
        }
        attributes {
            urgent: bool,
            tags: Vec<String>,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("label text is blank")]
struct BlankLabel;

impl Entity for Label {
    type Error = anyhow::Error;

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.text().trim().is_empty() {
            return Err(BlankLabel.into());
        }
        if *self.copies() > 500 {
            bail!("too many copies: {}", self.copies());
        }
        Ok(())
    }
}

fn label(text: &str) -> Label {
    Label::create(|l| l.text = text.to_string()).unwrap()
}

#[test]
fn validation_failure_of_any_kind_reaches_the_caller() {
    let err = Label::create(|l| l.copies = 1).unwrap_err();
    assert_eq!(err.downcast_ref::<BlankLabel>(), Some(&BlankLabel));

    let err = Label::create(|l| {
        l.text = "fragile".to_string();
        l.copies = 900;
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "too many copies: 900");
}

#[test]
fn attribute_errors_travel_through_caller_error_type() {
    let err = Label::create_with([("colour", json!("red"))], |l| {
        l.text = "x".to_string()
    })
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<EntityError>(),
        Some(&EntityError::unknown_attribute("Label", "colour"))
    );
}

#[test]
fn closures_can_use_caller_bindings_and_helpers() {
    let base = "parcel";
    let suffix = |n: u16| format!("{base}-{n}");

    let created = Label::try_create(|l| {
        l.copies = 3;
        l.text = suffix(l.copies);
        l.tags.push(base.to_string());
        l.write_attribute("urgent", json!(true))
            .context("writing urgent")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(created.text(), "parcel-3");
    assert_eq!(created.tags(), &["parcel".to_string()]);
    assert!(*created.urgent());
}

#[test]
fn frozen_labels_reject_by_name_writes() {
    let frozen = label("A");
    let err = frozen.write_attribute("text", json!("B")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "cannot modify `text` on a frozen `Label`: use `Label::create` or `Label::update` instead"
    );
    assert_eq!(frozen.text(), "A");
}

#[test]
fn failed_update_keeps_original_readable() {
    let original = label("A");
    let err = original.update(|l| l.text.clear()).unwrap_err();

    assert!(err.is::<BlankLabel>());
    assert_eq!(original.text(), "A");
    assert_eq!(original.attribute("text").unwrap(), json!("A"));
}

#[test]
fn draft_declares_every_attribute_block() {
    assert_eq!(LabelDraft::NAMES, &["text", "copies", "urgent", "tags"]);
    assert!(LabelDraft::declares("tags"));
    assert!(!LabelDraft::declares("colour"));
    assert_eq!(Label::attribute_names(), LabelDraft::NAMES);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: every value written in the closure is what the reader returns.
    #[test]
    fn readers_return_written_values(
        text in "[a-z][a-z0-9 ]{0,30}",
        copies in 0u16..=500,
        urgent in any::<bool>(),
        tags in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let created = Label::create(|l| {
            l.text = text.clone();
            l.copies = copies;
            l.urgent = urgent;
            l.tags = tags.clone();
        }).unwrap();

        prop_assert_eq!(created.text(), &text);
        prop_assert_eq!(*created.copies(), copies);
        prop_assert_eq!(*created.urgent(), urgent);
        prop_assert_eq!(created.tags(), &tags);
    }

    /// Property: closure writes win over the initial mapping.
    #[test]
    fn closure_wins_over_initial_mapping(
        initial in "[a-z]{1,12}",
        overriding in "[A-Z]{1,12}",
        copies in 0u16..=500,
    ) {
        let created = Label::create_with(
            [("text", json!(initial)), ("copies", json!(copies))],
            |l| l.text = overriding.clone(),
        ).unwrap();

        prop_assert_eq!(created.text(), &overriding);
        prop_assert_eq!(*created.copies(), copies);
    }

    /// Property: a partial update only changes what the closure writes.
    #[test]
    fn partial_update_preserves_unset_attributes(
        text in "[a-z]{1,12}",
        copies in 0u16..=500,
        new_copies in 0u16..=500,
        urgent in any::<bool>(),
    ) {
        let original = Label::create(|l| {
            l.text = text.clone();
            l.copies = copies;
            l.urgent = urgent;
        }).unwrap();

        let updated = original.update(|l| l.copies = new_copies).unwrap();

        prop_assert_eq!(updated.text(), original.text());
        prop_assert_eq!(updated.urgent(), original.urgent());
        prop_assert_eq!(*updated.copies(), new_copies);
        prop_assert_eq!(*original.copies(), copies);
    }
}
