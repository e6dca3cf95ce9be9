//! End-to-end behaviour of the guard across lock states, nesting and
//! array operations.

use std::str::FromStr;

use serde_json::json;
use warden_guard::prelude::*;

const SET_MSG: &str = "Object protected, you couldn't set data";
const DELETE_MSG: &str = "Object protected, you couldn't delete data";
const CREATE_MSG: &str = "Object protected, you couldn't create data";

fn root(guard: &Guard) -> GuardedNode {
    guard.data().as_node().expect("composite source").clone()
}

#[test]
fn new_guard_exposes_locked_data() {
    let guard = Guard::new(json!({ "num": 1 }));
    assert!(guard.is_locked());

    let data = root(&guard);
    assert_eq!(data.kind(), NodeKind::Object);
    assert_eq!(data.get("num").unwrap().snapshot().unwrap(), json!(1));
}

#[test]
fn locked_object_rejects_every_mutation_category() {
    let guard = Guard::new(json!({ "num": 1 }));
    let data = root(&guard);

    let err = data.set("num", json!(2)).unwrap_err();
    assert_eq!(err.to_string(), SET_MSG);

    let err = data.set("other_num", json!(3)).unwrap_err();
    assert_eq!(err.to_string(), SET_MSG);

    let err = data.remove("num").unwrap_err();
    assert_eq!(err.to_string(), DELETE_MSG);

    let err = data.define("other_num", json!(3)).unwrap_err();
    assert_eq!(err.to_string(), CREATE_MSG);

    // nothing changed
    assert_eq!(guard.snapshot().unwrap(), json!({ "num": 1 }));
}

#[test]
fn unlocked_object_permits_every_mutation_category() {
    let guard = Guard::new(json!({ "num": 1 }));
    guard.unlock();
    let data = root(&guard);

    data.set("num", json!(2)).unwrap();
    assert_eq!(data.get("num").unwrap().snapshot().unwrap(), json!(2));

    data.remove("num").unwrap();
    assert!(!data.contains_key("num"));

    data.set("other_num", json!(3)).unwrap();
    assert!(data.contains_key("other_num"));

    data.define("other_num2", json!(3)).unwrap();
    assert!(data.contains_key("other_num2"));
}

#[test]
fn relocking_restores_protection_and_keeps_changes() {
    let guard = Guard::new(json!({ "num": 1, "other_num": 2 }));
    guard.unlock();
    let data = root(&guard);

    data.set("num", json!(2)).unwrap();
    data.remove("other_num").unwrap();
    data.set("new_num", json!(3)).unwrap();

    guard.lock();

    assert_eq!(data.set("num", json!(4)).unwrap_err().to_string(), SET_MSG);
    assert_eq!(data.remove("num").unwrap_err().to_string(), DELETE_MSG);

    // unlocked-era changes persisted
    assert_eq!(
        guard.snapshot().unwrap(),
        json!({ "num": 2, "new_num": 3 })
    );
}

#[test]
fn deep_nesting_is_protected() {
    let guard = Guard::new(json!({ "foo": { "bar": { "num": 1 } } }));
    let bar = root(&guard)
        .at(&KeyPath::from_str("foo.bar").unwrap())
        .unwrap();
    let bar = bar.as_node().unwrap().clone();

    assert_eq!(bar.set("num", json!(2)).unwrap_err().to_string(), SET_MSG);
    assert_eq!(bar.remove("num").unwrap_err().to_string(), DELETE_MSG);

    guard.unlock();
    bar.set("num", json!(2)).unwrap();
    bar.set("other_num", json!(3)).unwrap();
    assert_eq!(
        guard.snapshot().unwrap(),
        json!({ "foo": { "bar": { "num": 2, "other_num": 3 } } })
    );
}

#[test]
fn locked_array_rejects_mutating_operations() {
    let guard = Guard::new(json!(["foo", "bar"]));
    let data = root(&guard);
    assert_eq!(data.kind(), NodeKind::Array);

    assert_eq!(data.push(json!("other")).unwrap_err().to_string(), SET_MSG);
    assert_eq!(
        data.unshift(json!("other")).unwrap_err().to_string(),
        SET_MSG
    );
    assert_eq!(data.pop().unwrap_err().to_string(), DELETE_MSG);
    assert_eq!(data.shift().unwrap_err().to_string(), SET_MSG);
    assert_eq!(
        data.set_index(0, json!("mod")).unwrap_err().to_string(),
        SET_MSG
    );

    assert_eq!(guard.snapshot().unwrap(), json!(["foo", "bar"]));
}

#[test]
fn unlocked_array_permits_mutating_operations() {
    let guard = Guard::new(json!(["foo", "bar"]));
    guard.unlock();
    let data = root(&guard);

    data.push(json!("other")).unwrap();
    assert_eq!(guard.snapshot().unwrap(), json!(["foo", "bar", "other"]));

    let popped = data.pop().unwrap().unwrap();
    assert_eq!(popped.snapshot().unwrap(), json!("other"));

    let shifted = data.shift().unwrap().unwrap();
    assert_eq!(shifted.snapshot().unwrap(), json!("foo"));

    data.unshift(json!("front")).unwrap();
    data.set_index(1, json!("mod")).unwrap();
    assert_eq!(guard.snapshot().unwrap(), json!(["front", "mod"]));
}

#[test]
fn nested_array_follows_the_shared_flag() {
    let guard = Guard::new(json!({ "a": ["foo", "bar"] }));
    let list = root(&guard).get("a").unwrap();
    let list = list.as_node().unwrap().clone();

    assert_eq!(list.push(json!("other")).unwrap_err().to_string(), SET_MSG);
    assert_eq!(list.pop().unwrap_err().to_string(), DELETE_MSG);

    guard.unlock();
    let popped = list.pop().unwrap().unwrap();
    assert_eq!(popped.snapshot().unwrap(), json!("bar"));
    assert_eq!(guard.snapshot().unwrap(), json!({ "a": ["foo"] }));

    guard.lock();
    assert_eq!(list.pop().unwrap_err().to_string(), DELETE_MSG);
    assert_eq!(guard.snapshot().unwrap(), json!({ "a": ["foo"] }));
}

#[test]
fn composites_attached_while_unlocked_are_guarded() {
    let guard = Guard::new(json!({}));
    let data = root(&guard);

    guard.unlock();
    data.set("attached", json!({ "deep": [1, 2] })).unwrap();
    guard.lock();

    let attached = data.get("attached").unwrap();
    let attached = attached.as_node().unwrap().clone();
    assert_eq!(
        attached.set("deep", json!(0)).unwrap_err().to_string(),
        SET_MSG
    );

    let deep = attached.get("deep").unwrap();
    let deep = deep.as_node().unwrap().clone();
    assert_eq!(deep.push(json!(3)).unwrap_err().to_string(), SET_MSG);
}

#[test]
fn handles_observe_toggles_made_after_they_were_taken() {
    let guard = Guard::new(json!({ "inner": {} }));

    // handle taken while locked
    let inner = root(&guard).get("inner").unwrap();
    let inner = inner.as_node().unwrap().clone();
    assert!(inner.set("k", json!(1)).is_err());

    guard.unlock();
    inner.set("k", json!(1)).unwrap();

    guard.lock();
    assert!(inner.set("k", json!(2)).is_err());
}

#[test]
fn define_path_skips_recursive_wrapping() {
    let guard = Guard::new(json!({}));
    let data = root(&guard);

    guard.unlock();
    data.define("blob", json!({ "inner": 1 })).unwrap();
    guard.lock();

    // the composite went in unwrapped and is not individually guarded
    let blob = data.get("blob").unwrap();
    assert!(blob.as_node().is_none());
    assert_eq!(blob.as_raw(), Some(&json!({ "inner": 1 })));
    assert!(data.at(&KeyPath::from_str("blob.inner").unwrap()).is_none());
}

#[test]
fn passthrough_guard_degrades_to_no_protection() {
    let guard = Guard::with_strategy(json!({ "num": 1, "a": [1] }), &Passthrough);
    let data = root(&guard);

    // locked, but every mutation succeeds
    data.set("num", json!(2)).unwrap();
    data.get("a").unwrap().as_node().unwrap().push(json!(2)).unwrap();

    guard.lock();
    data.remove("num").unwrap();

    assert_eq!(guard.snapshot().unwrap(), json!({ "a": [1, 2] }));
}

#[test]
fn path_mutation_respects_the_lock() {
    let guard = Guard::new(json!({ "foo": { "bar": [10, 20] } }));
    let data = root(&guard);
    let path = KeyPath::from_str("foo.bar.0").unwrap();

    let err = data.set_at(&path, json!(0)).unwrap_err();
    assert_eq!(err.to_string(), SET_MSG);

    guard.unlock();
    data.set_at(&path, json!(0)).unwrap();
    assert_eq!(data.at(&path).unwrap().snapshot().unwrap(), json!(0));

    let removed = data.remove_at(&path).unwrap().unwrap();
    assert_eq!(removed.snapshot().unwrap(), json!(0));
    assert_eq!(guard.snapshot().unwrap(), json!({ "foo": { "bar": [20] } }));
}
