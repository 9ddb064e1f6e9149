use super::*;

fn armed_at_origin() -> LongPress {
    let mut lp = LongPress::new(600.0, 10.0);
    lp.arm(1000.0, Point::new(50.0, 50.0));
    lp
}

#[test]
fn new_is_disarmed() {
    let mut lp = LongPress::new(600.0, 10.0);
    assert!(!lp.is_armed());
    assert!(!lp.poll(1_000_000.0));
}

#[test]
fn fires_at_hold_time() {
    let mut lp = armed_at_origin();
    assert!(!lp.poll(1599.0));
    assert!(lp.is_armed());
    assert!(lp.poll(1600.0));
    assert!(!lp.is_armed());
}

#[test]
fn fires_only_once() {
    let mut lp = armed_at_origin();
    assert!(lp.poll(2000.0));
    assert!(!lp.poll(3000.0));
}

#[test]
fn movement_within_slop_keeps_it_armed() {
    let mut lp = armed_at_origin();
    assert!(!lp.on_move(Point::new(60.0, 40.0)));
    assert!(lp.is_armed());
    assert!(lp.poll(1600.0));
}

#[test]
fn movement_past_slop_cancels() {
    let mut lp = armed_at_origin();
    assert!(lp.on_move(Point::new(50.0, 61.0)));
    assert!(!lp.is_armed());
    assert!(!lp.poll(5000.0));
}

#[test]
fn on_move_when_disarmed_is_noop() {
    let mut lp = LongPress::new(600.0, 10.0);
    assert!(!lp.on_move(Point::new(500.0, 500.0)));
}

#[test]
fn cancel_disarms() {
    let mut lp = armed_at_origin();
    lp.cancel();
    assert!(!lp.poll(1600.0));
}

#[test]
fn rearm_restarts_clock() {
    let mut lp = armed_at_origin();
    lp.arm(1500.0, Point::new(0.0, 0.0));
    assert!(!lp.poll(1600.0));
    assert!(lp.poll(2100.0));
}
