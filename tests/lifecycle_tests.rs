//! End-to-end tests of the save lifecycle against an in-memory store.

use stategate::{Dispatcher, Ruleset, RulesetBuilder, StateRecord, Store, Violation};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Clone, Debug)]
struct User {
    state: &'static str,
    persisted: Option<&'static str>,
}

impl User {
    fn create(state: &'static str) -> Self {
        Self {
            state,
            persisted: None,
        }
    }
}

impl StateRecord for User {
    type State = &'static str;

    fn state(&self) -> &&'static str {
        &self.state
    }

    fn persisted_state(&self) -> Option<&&'static str> {
        self.persisted.as_ref()
    }
}

#[derive(Debug, Error)]
#[error("constraint violated")]
struct ConstraintViolated;

#[derive(Default)]
struct MemStore {
    commits: usize,
}

impl Store<User> for MemStore {
    type Error = ConstraintViolated;

    fn begin(&mut self) -> Result<(), ConstraintViolated> {
        Ok(())
    }

    fn persist(&mut self, user: &mut User) -> Result<(), ConstraintViolated> {
        user.persisted = Some(user.state);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), ConstraintViolated> {
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), ConstraintViolated> {
        Ok(())
    }
}

fn user_rules() -> Ruleset<&'static str, User> {
    RulesetBuilder::new("state")
        .permit_transition("registered", "active")
        .permit_transition("active", "banned")
        .permit_transition("banned", "active")
        .permit_transition("active", "deleted")
        .build()
        .unwrap()
}

#[test]
fn full_walk_through_the_declared_graph() {
    let dispatcher = Dispatcher::new(user_rules());
    let mut store = MemStore::default();
    let mut user = User::create("registered");
    dispatcher.save(&mut user, &mut store).unwrap();

    for next in ["active", "banned", "active", "deleted"] {
        user.state = next;
        let change = dispatcher.save(&mut user, &mut store).unwrap();
        assert_eq!(change.unwrap().to, next);
    }

    assert_eq!(user.state, "deleted");
    assert_eq!(user.persisted, Some("deleted"));
    assert_eq!(store.commits, 5);
}

#[test]
fn undeclared_transition_is_rejected_with_both_endpoints() {
    let dispatcher = Dispatcher::new(user_rules());
    let mut store = MemStore::default();
    let mut user = User::create("registered");
    dispatcher.save(&mut user, &mut store).unwrap();

    user.state = "active";
    dispatcher.save(&mut user, &mut store).unwrap();

    user.state = "registered";
    let error = dispatcher.save(&mut user, &mut store).unwrap_err();

    assert_eq!(
        error.violations().unwrap().to_string(),
        "Invalid transition from active to registered"
    );
    // The rejected value is still in memory; the committed one is untouched.
    assert_eq!(user.persisted, Some("active"));
}

#[test]
fn unknown_value_is_a_domain_violation_not_a_transition_error() {
    let dispatcher = Dispatcher::new(user_rules());
    let mut store = MemStore::default();
    let mut user = User {
        state: "missing",
        persisted: Some("active"),
    };

    let error = dispatcher.save(&mut user, &mut store).unwrap_err();
    let violations = error.violations().unwrap();

    assert_eq!(violations.to_string(), "'missing' is not a valid state");
    assert!(matches!(
        violations.iter().next().unwrap(),
        Violation::Domain { .. }
    ));
}

#[test]
fn assertion_api_against_a_live_entity() {
    let dispatcher = Dispatcher::new(user_rules());
    let user = User {
        state: "active",
        persisted: Some("active"),
    };

    assert!(dispatcher.ensure_one_of(&user, &["active", "banned"]).is_ok());

    let error = dispatcher
        .ensure_one_of(&user, &["banned", "deleted"])
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "state must be one of [\"banned\", \"deleted\"] but was \"active\""
    );

    let error = dispatcher
        .ensure_may_transition_to(&user, &"active")
        .unwrap_err();
    assert_eq!(error.to_string(), "state already is \"active\"");

    let error = dispatcher
        .ensure_may_transition_to(&user, &"registered")
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "state may not transition from \"active\" to \"registered\""
    );

    assert!(dispatcher.may_transition_to(&user, &"banned"));
    assert!(!dispatcher.may_transition_to(&user, &"registered"));
    assert!(!dispatcher.may_transition_to(&user, &"missing"));
}

mod enum_tokens {
    use super::*;

    stategate::state_tokens! {
        pub enum OrderState {
            Draft = "draft",
            Placed = "placed",
            Shipped = "shipped",
            Cancelled = "cancelled",
        }
    }

    #[derive(Clone, Debug)]
    struct Order {
        state: OrderState,
        persisted: Option<OrderState>,
        confirmation_sent: bool,
    }

    impl StateRecord for Order {
        type State = OrderState;

        fn state(&self) -> &OrderState {
            &self.state
        }

        fn persisted_state(&self) -> Option<&OrderState> {
            self.persisted.as_ref()
        }
    }

    struct OrderStore;

    impl Store<Order> for OrderStore {
        type Error = ConstraintViolated;

        fn begin(&mut self) -> Result<(), ConstraintViolated> {
            Ok(())
        }

        fn persist(&mut self, order: &mut Order) -> Result<(), ConstraintViolated> {
            order.persisted = Some(order.state);
            Ok(())
        }

        fn commit(&mut self) -> Result<(), ConstraintViolated> {
            Ok(())
        }

        fn rollback(&mut self) -> Result<(), ConstraintViolated> {
            Ok(())
        }
    }

    #[test]
    fn enum_tokens_drive_the_same_lifecycle() {
        let notified = Arc::new(Mutex::new(Vec::new()));
        let on_shipped = Arc::clone(&notified);

        let rules = RulesetBuilder::new("state")
            .permit_transition(OrderState::Draft, OrderState::Placed)
            .permit_transition(OrderState::Placed, OrderState::Shipped)
            .permit_transition(OrderState::Placed, OrderState::Cancelled)
            .on_pre_write(OrderState::Placed, |order: &mut Order| {
                order.confirmation_sent = true;
                Ok(())
            })
            .on_commit(OrderState::Shipped, move |_: &Order| {
                on_shipped.lock().unwrap().push("shipped");
                Ok(())
            })
            .build()
            .unwrap();
        let dispatcher = Dispatcher::new(rules);
        let mut store = OrderStore;
        let mut order = Order {
            state: OrderState::Draft,
            persisted: Some(OrderState::Draft),
            confirmation_sent: false,
        };

        order.state = OrderState::Placed;
        dispatcher.save(&mut order, &mut store).unwrap();
        assert!(order.confirmation_sent);
        assert!(notified.lock().unwrap().is_empty());

        order.state = OrderState::Shipped;
        dispatcher.save(&mut order, &mut store).unwrap();
        assert_eq!(*notified.lock().unwrap(), vec!["shipped"]);

        // Shipped is terminal in this ruleset.
        order.state = OrderState::Cancelled;
        let error = dispatcher.save(&mut order, &mut store).unwrap_err();
        assert_eq!(
            error.violations().unwrap().to_string(),
            "Invalid transition from shipped to cancelled"
        );
    }
}
