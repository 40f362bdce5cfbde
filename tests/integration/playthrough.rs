//! Whole playthroughs through the line interface and save files.

use delve_engine::EngineConfig;
use delve_runtime::{Outcome, Session, run_batch, serialize};

fn session() -> Session {
    Session::sample(EngineConfig::default()).unwrap()
}

#[test]
fn batch_script_plays_the_keep() {
    let mut session = session();
    let script = "\
look
stash torch
equip rusty sword
move north
attack goblin with rusty sword
move west
:actions
:quit
look
";
    let mut output = Vec::new();
    run_batch(&mut session, script.as_bytes(), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("You stash the Torch."));
    assert!(text.contains("You equip the Rusty Sword."));
    assert!(text.contains("You attack Goblin with the Rusty Sword."));
    assert!(text.contains("Error:"));
    assert_eq!(session.actions().unwrap().len(), 5);
}

#[test]
fn history_survives_a_save_file() {
    let session = session();
    session.process("stash torch").unwrap();
    let records = session.process("move down").unwrap();

    let bytes = serialize::to_bytes(&session.store().snapshot().unwrap()).unwrap();
    let restored =
        Session::from_tables(serialize::from_bytes(&bytes).unwrap(), EngineConfig::default())
            .unwrap();

    assert_eq!(restored.character_instance_id(), session.character_instance_id());
    assert_eq!(restored.record_set(records.action.id).unwrap(), records);
    assert_eq!(restored.location().unwrap().location.name, "Cellar");
}

#[test]
fn meta_commands_report_history() {
    let mut session = session();
    session.execute("look north").unwrap();
    let actions = session.actions().unwrap();

    let Outcome::History(records) = session
        .execute(&format!(":history {}", actions[0].id))
        .unwrap()
    else {
        panic!("expected history");
    };
    assert_eq!(records.action, actions[0]);
    assert_eq!(records.target_location.unwrap().monsters[0].name, "Goblin");
}
