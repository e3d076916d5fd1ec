//! Tests for the paced opponent reply and its cancellation.

use std::time::Duration;
use tictactoe_duel::{
    Board, Controller, FirstAvailable, GameSession, GameStatus, Mark, Position, ReplyTimer,
    SessionError, Square,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};

const DELAY: Duration = Duration::from_millis(600);

fn controller() -> (Controller, mpsc::UnboundedReceiver<tictactoe_duel::ReplyTicket>) {
    let session = GameSession::new(Mark::X, Box::new(FirstAvailable::new("AI")));
    Controller::new(session, DELAY)
}

#[tokio::test(start_paused = true)]
async fn test_reply_arrives_after_delay() {
    let (mut controller, mut rx) = controller();
    let start = Instant::now();
    controller.tap(4).unwrap();
    assert!(controller.awaiting_reply());

    // Nothing before the delay has elapsed
    assert!(timeout(DELAY - Duration::from_millis(1), rx.recv()).await.is_err());

    let ticket = rx.recv().await.unwrap();
    assert!(start.elapsed() >= DELAY);

    let reply = controller.on_reply(ticket).unwrap();
    assert_eq!(reply.placed().position, Position::TopLeft);
    assert_eq!(
        controller.session().state().board().get(Position::TopLeft),
        Square::Occupied(Mark::O)
    );
    assert!(controller.session().is_human_turn());
}

#[tokio::test(start_paused = true)]
async fn test_awaiting_reply_until_delivered_ticket_is_applied() {
    let (mut controller, mut rx) = controller();
    controller.tap(4).unwrap();
    let ticket = rx.recv().await.unwrap();
    tokio::task::yield_now().await;

    // Delivered but not yet applied: the human still cannot move
    assert!(!controller.session().is_human_turn());
    assert!(controller.awaiting_reply());

    controller.on_reply(ticket).unwrap();
    assert!(!controller.awaiting_reply());
    assert!(controller.session().is_human_turn());
}

#[tokio::test(start_paused = true)]
async fn test_stale_ticket_does_not_clear_current_wait() {
    let (mut controller, mut rx) = controller();
    controller.tap(4).unwrap();
    let stale = rx.recv().await.unwrap();

    controller.reset();
    controller.tap(0).unwrap();
    assert!(controller.on_reply(stale).is_err());
    assert!(controller.awaiting_reply());

    let fresh = rx.recv().await.unwrap();
    assert_eq!(fresh.generation(), 1);
    controller.on_reply(fresh).unwrap();
    assert!(!controller.awaiting_reply());
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_delay_discards_reply() {
    let (mut controller, mut rx) = controller();
    controller.tap(4).unwrap();
    controller.reset();
    assert!(!controller.awaiting_reply());

    tokio::time::sleep(DELAY * 3).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(controller.session().state().board(), &Board::new());
    assert!(controller.session().is_human_turn());
}

#[tokio::test(start_paused = true)]
async fn test_stale_ticket_that_slips_through_is_refused() {
    let (mut controller, mut rx) = controller();
    controller.tap(4).unwrap();
    let ticket = rx.recv().await.unwrap();

    // Reset lands after delivery but before the ticket is handled
    controller.reset();
    assert!(matches!(
        controller.on_reply(ticket),
        Err(SessionError::StaleReply { .. })
    ));
    assert_eq!(controller.session().state().board(), &Board::new());
}

#[tokio::test(start_paused = true)]
async fn test_taps_during_delay_are_ignored() {
    let (mut controller, mut rx) = controller();
    controller.tap(4).unwrap();
    assert!(controller.tap(5).is_err());
    assert!(controller.session().state().board().is_empty(Position::MiddleRight));

    let ticket = rx.recv().await.unwrap();
    controller.on_reply(ticket).unwrap();
    assert!(controller.tap(5).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_no_reply_scheduled_after_winning_move() {
    let (mut controller, mut rx) = controller();
    // X: 3, 4, 5 ; FirstAvailable O: 0, 1
    for cell in [3, 4] {
        controller.tap(cell).unwrap();
        let ticket = rx.recv().await.unwrap();
        controller.on_reply(ticket).unwrap();
    }
    let turn = controller.tap(5).unwrap();
    assert_eq!(*turn.status(), GameStatus::Won(Mark::X));
    assert!(!controller.awaiting_reply());
    assert_eq!(controller.session().score().wins(Mark::X), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_timer_cancels_delivery() {
    let (mut controller, mut rx) = controller();
    let ticket = controller.tap(4).unwrap().reply().unwrap();

    let (tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut timer = ReplyTimer::new();
    timer.schedule(ticket, DELAY, tx);
    assert!(timer.is_pending());
    drop(timer);

    // The controller's own delivery still happens
    assert!(rx.recv().await.is_some());
    tokio::time::sleep(DELAY * 2).await;
    assert!(timer_rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_rescheduling_replaces_pending_send() {
    let (mut controller, _rx) = controller();
    let ticket = controller.tap(4).unwrap().reply().unwrap();

    let (tx, mut timer_rx) = mpsc::unbounded_channel();
    let mut timer = ReplyTimer::new();
    timer.schedule(ticket, DELAY, tx.clone());
    timer.schedule(ticket, DELAY * 2, tx);

    let start = Instant::now();
    assert_eq!(timer_rx.recv().await, Some(ticket));
    assert!(start.elapsed() >= DELAY * 2);
    assert!(timer_rx.try_recv().is_err());
    assert!(!timer.cancel());
}
