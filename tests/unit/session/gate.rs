use super::*;

#[test]
fn second_interaction_is_rejected_while_busy() {
    let mut gate = InteractionGate::new();
    let ticket = gate.try_begin(AssetKind::Gujiya).unwrap();
    assert_eq!(ticket.kind(), AssetKind::Gujiya);
    assert!(gate.is_busy());
    assert!(gate.try_begin(AssetKind::Pichkari).is_none());
    assert!(gate.try_begin(AssetKind::Gujiya).is_none());
    assert_eq!(gate.active_kind(), Some(AssetKind::Gujiya));
}

#[test]
fn release_reopens_the_gate() {
    let mut gate = InteractionGate::new();
    let ticket = gate.try_begin(AssetKind::Gulal).unwrap();
    assert!(gate.release(ticket));
    assert!(!gate.is_busy());
    assert!(gate.try_begin(AssetKind::Pichkari).is_some());
}

#[test]
fn stale_ticket_does_not_release_a_newer_interaction() {
    let mut gate = InteractionGate::new();
    let first = gate.try_begin(AssetKind::Gulal).unwrap();
    let stale = SessionTicket {
        id: first.id,
        kind: first.kind,
    };
    assert!(gate.release(first));
    let _second = gate.try_begin(AssetKind::Pichkari).unwrap();
    assert!(!gate.release(stale));
    assert_eq!(gate.active_kind(), Some(AssetKind::Pichkari));
}
