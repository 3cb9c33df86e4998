//! End-to-end behaviour of a document review workflow.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fieldstate::builder::{RuleBuilder, TableBuilder};
use fieldstate::checkpoint::Checkpoint;
use fieldstate::machine::{Dispatched, FsmError, StateMachine, TransitionHooks};
use fieldstate::store::{MemoryStore, Persistence, Record};
use fieldstate::{Entity, TransitionRule, TransitionTable};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

fn review_table() -> TransitionTable {
    TransitionTable::new(
        "draft",
        vec![
            TransitionRule::new(["draft"], "submitted", "submit"),
            TransitionRule::new(["submitted"], "approved", "approve"),
        ],
    )
    .unwrap()
}

fn minute_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
    let start = Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap();
    let minutes = AtomicI64::new(0);
    move || start + Duration::minutes(minutes.fetch_add(1, Ordering::SeqCst))
}

#[test]
fn submit_then_approve_scenario() {
    let machine = StateMachine::new(review_table());
    let mut store = MemoryStore::new();
    let mut doc = Record::new();

    assert_eq!(
        machine.dispatch(&mut doc, &mut store, "canSubmit"),
        Ok(Dispatched::Allowed(true))
    );

    assert_eq!(machine.fire(&mut doc, &mut store, "submit"), Ok(true));
    assert_eq!(machine.current_state(&mut doc), "submitted");
    assert_eq!(
        machine.dispatch(&mut doc, &mut store, "canSubmit"),
        Ok(Dispatched::Allowed(false))
    );

    assert_eq!(machine.fire(&mut doc, &mut store, "approve"), Ok(true));
    assert_eq!(machine.current_state(&mut doc), "approved");

    assert_eq!(
        machine.fire(&mut doc, &mut store, "submit"),
        Err(FsmError::InvalidTransition {
            from: "approved".to_string(),
            action: "submit".to_string(),
        })
    );
    assert_eq!(machine.current_state(&mut doc), "approved");
    assert_eq!(
        store.find(doc.id()).and_then(|r| r.field("state").map(String::from)),
        Some("approved".to_string())
    );
}

#[test]
fn history_is_tracked_through_the_workflow() {
    let table = TableBuilder::new()
        .initial("draft")
        .track_history(true)
        .transition(RuleBuilder::new().from("draft").to("submitted").on("submit"))
        .unwrap()
        .transition(RuleBuilder::new().from("submitted").to("draft").on("sendBack"))
        .unwrap()
        .build()
        .unwrap();
    let machine = StateMachine::new(table).with_clock(minute_clock());
    let mut store = MemoryStore::new();
    let mut doc = Record::new();

    assert!(machine.save(&mut doc, &mut store));
    machine.fire(&mut doc, &mut store, "submit").unwrap();
    machine.dispatch(&mut doc, &mut store, "send_back").unwrap();

    let draft_at = machine.dispatch(&mut doc, &mut store, "draftAt").unwrap();
    let submitted_at = machine.dispatch(&mut doc, &mut store, "submitted_at").unwrap();

    assert_eq!(
        draft_at,
        Dispatched::EnteredAt(Some(Utc.with_ymd_and_hms(2024, 9, 1, 8, 2, 0).unwrap()))
    );
    assert_eq!(
        submitted_at,
        Dispatched::EnteredAt(Some(Utc.with_ymd_and_hms(2024, 9, 1, 8, 1, 0).unwrap()))
    );

    let stored = store.find(doc.id()).unwrap();
    assert_eq!(stored.state_change_at(), doc.state_change_at());
}

#[derive(Default)]
struct AuditTrail {
    lines: Mutex<Vec<String>>,
}

impl TransitionHooks<Record> for AuditTrail {
    fn before_transition(&self, _entity: &mut Record, from: Option<&str>, to: Option<&str>) {
        if let (Some(from), Some(to)) = (from, to) {
            self.lines.lock().unwrap().push(format!("leaving {from} for {to}"));
        }
    }

    fn after_transition(&self, entity: &mut Record, _from: Option<&str>, to: Option<&str>) {
        if to == Some("approved") {
            entity.set_field("approved_by", "reviewer".to_string());
        }
    }
}

#[test]
fn integrator_hooks_see_each_transition() {
    let machine = StateMachine::new(review_table()).with_hooks(AuditTrail::default());
    let mut store = MemoryStore::new();
    let mut doc = Record::new();

    machine.fire(&mut doc, &mut store, "submit").unwrap();
    machine.fire(&mut doc, &mut store, "approve").unwrap();

    assert_eq!(
        *machine.hooks().lines.lock().unwrap(),
        vec![
            "leaving draft for submitted".to_string(),
            "leaving submitted for approved".to_string(),
        ]
    );
    assert_eq!(doc.field("approved_by"), Some("reviewer"));
}

/// Collaborator that records the order in which lifecycle hooks run.
#[derive(Default)]
struct TracingStore {
    persisted: bool,
    events: Vec<String>,
}

impl Persistence<Record> for TracingStore {
    fn is_persisted(&self, _entity: &Record) -> bool {
        self.persisted
    }

    fn write(&mut self, entity: &Record) -> Result<(), fieldstate::store::PersistenceError> {
        self.events
            .push(format!("write {}", entity.field("state").unwrap_or("")));
        self.persisted = true;
        Ok(())
    }
}

struct HookOrder(Mutex<Vec<String>>);

impl TransitionHooks<Record> for HookOrder {
    fn before_transition(&self, entity: &mut Record, _from: Option<&str>, _to: Option<&str>) {
        self.0
            .lock()
            .unwrap()
            .push(format!("before {}", entity.field("state").unwrap_or("")));
    }

    fn after_transition(&self, _entity: &mut Record, _from: Option<&str>, _to: Option<&str>) {
        self.0.lock().unwrap().push("after".to_string());
    }
}

#[test]
fn first_save_defaults_state_before_hooks_and_write() {
    let machine = StateMachine::new(review_table()).with_hooks(HookOrder(Mutex::new(Vec::new())));
    let mut store = TracingStore::default();
    let mut doc = Record::new();

    assert!(machine.save(&mut doc, &mut store));
    assert_eq!(machine.fire(&mut doc, &mut store, "submit"), Ok(true));

    assert_eq!(store.events, vec!["write draft", "write submitted"]);
    assert_eq!(
        *machine.hooks().0.lock().unwrap(),
        vec!["before draft", "after", "before submitted", "after"]
    );
}

#[test]
fn table_loaded_from_json_drives_dispatch() {
    let table = TransitionTable::from_json(
        r#"{
            "initial_state": "pending",
            "state_field": "status",
            "transitions": [
                { "from": ["pending"], "to": "paid", "on": "markPaid" },
                { "from": ["pending", "paid"], "to": "cancelled", "on": "cancel" }
            ]
        }"#,
    )
    .unwrap();
    let machine = StateMachine::new(table);
    let mut store = MemoryStore::new();
    let mut order = Record::new();

    assert_eq!(
        machine.dispatch(&mut order, &mut store, "canMarkPaid"),
        machine.dispatch(&mut order, &mut store, "can_mark_paid")
    );
    assert_eq!(
        machine.dispatch(&mut order, &mut store, "mark_paid"),
        Ok(Dispatched::Fired(true))
    );
    assert_eq!(order.field("status"), Some("paid"));
    assert_eq!(order.field("state"), None);
    assert_eq!(
        machine.dispatch(&mut order, &mut store, "isPaid"),
        Ok(Dispatched::InState(true))
    );
    assert_eq!(
        machine.dispatch(&mut order, &mut store, "cancel"),
        Ok(Dispatched::Fired(true))
    );
    assert_eq!(machine.table().terminal_states(), vec!["cancelled"]);
}

#[test]
fn checkpointed_record_resumes_where_it_left_off() {
    let machine = StateMachine::new(review_table()).with_clock(minute_clock());
    let mut store = MemoryStore::new();
    let mut doc = Record::new();
    machine.fire(&mut doc, &mut store, "submit").unwrap();

    let bytes = Checkpoint::capture(&doc, machine.now()).to_binary().unwrap();
    let checkpoint = Checkpoint::from_binary(&bytes).unwrap();
    assert_eq!(
        checkpoint.taken_at,
        Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
    );
    let mut resumed = checkpoint.restore(machine.table()).unwrap();

    assert_eq!(resumed.id(), doc.id());
    assert!(machine.can_fire(&resumed, "approve"));
    assert_eq!(machine.fire(&mut resumed, &mut store, "approve"), Ok(true));
    assert_eq!(store.len(), 1);
}
