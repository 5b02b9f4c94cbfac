//! Shared record fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use jab_core::codec::{Layout, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Record for Person {
    fn type_name() -> &'static str {
        "Person"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("name").scalar("age").build()
    }
}

pub fn some_person() -> Person {
    Person { name: "Some Name".into(), age: 123456 }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<i64>,
    pub label: Option<String>,
}

impl Record for Item {
    fn type_name() -> &'static str {
        "Item"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("label").scalar("id").build()
    }
}

/// Ancestor level: its fields come first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Audited {
    pub owner: Option<String>,
    pub created: Option<i64>,
}

impl Record for Audited {
    fn type_name() -> &'static str {
        "Audited"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("owner").scalar("created").build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dummy {
    #[serde(flatten)]
    pub audit: Audited,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub score: Option<f64>,
    pub active: Option<bool>,
    pub bytes: Option<Vec<u8>>,
    pub tags: Option<Vec<String>>,
    pub counts: Option<BTreeMap<String, i32>>,
    pub item: Option<Item>,
    pub items: Option<Vec<Item>>,
    pub item_map: Option<BTreeMap<String, Item>>,
}

impl Record for Dummy {
    fn type_name() -> &'static str {
        "Dummy"
    }

    fn layout() -> Layout {
        Layout::builder()
            .extends(Audited::layout())
            .scalar("name")
            .scalar("age")
            .scalar("score")
            .scalar("active")
            .scalar("bytes")
            .scalar("tags")
            .scalar("counts")
            .record::<Item>("item")
            .list::<Item>("items")
            .map::<Item>("item_map")
            .build()
    }
}

pub fn item(id: i64, label: &str) -> Item {
    Item { id: Some(id), label: Some(label.into()) }
}

/// Every field set, nested records included.
pub fn full_dummy() -> Dummy {
    Dummy {
        audit: Audited { owner: Some("ops".into()), created: Some(1_700_000_000) },
        name: Some("Dummy \"quoted\" [null, ]".into()),
        age: Some(42),
        score: Some(12.5),
        active: Some(true),
        bytes: Some(vec![0, 1, 2, 254, 255]),
        tags: Some(vec!["a".into(), "null".into(), String::new()]),
        counts: Some(BTreeMap::from([("x".to_string(), 1), ("y".to_string(), -2)])),
        item: Some(item(1, "first")),
        items: Some(vec![item(2, "second"), Item::default(), item(3, "third")]),
        item_map: Some(BTreeMap::from([
            ("k1".to_string(), item(4, "fourth")),
            ("k2".to_string(), Item { id: Some(5), label: None }),
        ])),
    }
}

/// Mostly nulls, with empty collections.
pub fn sparse_dummy() -> Dummy {
    Dummy {
        name: Some("sparse".into()),
        tags: Some(Vec::new()),
        items: Some(Vec::new()),
        item_map: Some(BTreeMap::new()),
        ..Dummy::default()
    }
}

/// Flip the character in the middle of the last bracketed region.
pub fn tamper(token: &str) -> String {
    let start = token.rfind('[').expect("payload bracket") + 1;
    let end = token.len() - 1;
    let mid = start + (end - start) / 2;
    let mut chars: Vec<char> = token.chars().collect();
    // tokens in these tests are ASCII, so byte and char indices agree
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
