//! Integration tests for change notification
//!
//! Events go to the listeners of the unit that changed and nowhere else.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use army_builder::army::{Combatant, Equipment, Formation, Observable, Unit, UnitRef};
use army_builder::core::error::ArmyError;
use army_builder::notify::{EventLog, UnitEvent};

#[test]
fn test_experience_event_stays_local() {
    let jean = Combatant::new("Jean", 10, 10, 10, "Corporal").unwrap();
    let unrelated = Formation::new("Bravo").unwrap();

    let on_jean = Rc::new(EventLog::default());
    let on_bravo = Rc::new(EventLog::default());
    jean.subscribe(on_jean.clone());
    unrelated.subscribe(on_bravo.clone());

    jean.gain_experience(15).unwrap();

    assert_eq!(on_jean.len(), 1);
    let message = &on_jean.messages()[0];
    assert!(message.contains("15"));
    assert!(message.contains("Jean"));
    assert!(on_bravo.is_empty());
}

#[test]
fn test_member_events_do_not_bubble_up() {
    let company = Formation::new("Company").unwrap();
    let squad = Formation::new("Squad").unwrap();
    company.add_member(&squad).unwrap();

    let company_log = Rc::new(EventLog::default());
    let squad_log = Rc::new(EventLog::default());
    company.subscribe(company_log.clone());
    squad.subscribe(squad_log.clone());

    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    squad.add_member(&jean).unwrap();
    jean.equip(Equipment::rifle());

    assert_eq!(squad_log.messages(), vec!["Jean added to Squad"]);
    assert!(company_log.is_empty());
}

#[test]
fn test_formation_event_sequence() {
    let alpha = Formation::new("Alpha").unwrap();
    let log = Rc::new(EventLog::default());
    alpha.subscribe(log.clone());

    let hugo = Combatant::new("Hugo", 20, 20, 20, "Captain").unwrap();
    let marc = Combatant::new("Marc", 18, 18, 18, "Lieutenant").unwrap();
    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();

    alpha.assign_commander(hugo).unwrap();
    alpha.add_member(&jean).unwrap();
    alpha.assign_commander(marc).unwrap();
    alpha.remove_member(&jean).unwrap();

    assert_eq!(
        log.messages(),
        vec![
            "Hugo took command of Alpha",
            "Jean added to Alpha",
            "Hugo relieved of command of Alpha",
            "Marc took command of Alpha",
            "Jean removed from Alpha",
        ]
    );
}

#[test]
fn test_failed_operations_publish_nothing() {
    let alpha = Formation::new("Alpha").unwrap();
    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    let log = Rc::new(EventLog::default());
    alpha.subscribe(log.clone());
    jean.subscribe(log.clone());

    assert!(alpha.add_member(&alpha).is_err());
    assert!(alpha.remove_member(&jean).is_err());
    assert!(jean.unequip(&Equipment::boots()).is_err());

    assert!(log.is_empty());
}

#[test]
fn test_listener_receives_source_handle() {
    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    let seen: Rc<RefCell<Vec<(String, u64)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    jean.subscribe_fn(move |source: &UnitRef, event: &UnitEvent| {
        let message = format!("{} via {}", event, source.kind());
        sink.borrow_mut().push((message, source.effective_power()));
    });

    jean.equip(Equipment::vest());
    assert_eq!(
        *seen.borrow(),
        vec![("Jean equipped with Vest via combatant".to_string(), 35)]
    );
}

#[test]
fn test_listener_can_mutate_other_units() {
    // A quartermaster that issues boots to whoever joins the squad
    let squad = Formation::new("Squad").unwrap();
    let issued = Rc::new(Cell::new(0));
    let counter = Rc::clone(&issued);
    squad.subscribe_fn(move |source, event| {
        if !matches!(event, UnitEvent::MemberAdded { .. }) {
            return;
        }
        if let Some(formation) = source.as_formation() {
            for member in formation.members() {
                if let Some(c) = member.as_combatant() {
                    if c.equipment().is_empty() {
                        c.equip(Equipment::boots());
                        counter.set(counter.get() + 1);
                    }
                }
            }
        }
    });

    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    squad.add_member(&jean).unwrap();

    assert_eq!(issued.get(), 1);
    assert_eq!(jean.effective_power(), 35);
}

#[test]
fn test_unsubscribe_semantics() {
    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    let log = Rc::new(EventLog::default());
    let id = jean.subscribe(log.clone());

    jean.gain_experience(1).unwrap();
    jean.unsubscribe(id).unwrap();
    jean.gain_experience(1).unwrap();
    assert_eq!(log.len(), 1);

    let err = jean.unsubscribe(id).unwrap_err();
    assert!(matches!(err, ArmyError::NotFound(_)));
}

#[test]
#[should_panic(expected = "listener failure")]
fn test_listener_panic_propagates_to_caller() {
    let jean = Combatant::new("Jean", 10, 10, 10, "Private").unwrap();
    jean.subscribe_fn(|_, _| panic!("listener failure"));
    jean.equip(Equipment::rifle());
}
