use std::{cell::RefCell, rc::Rc};

use snake_controller::{
    controller::Controller,
    gridsnake::{
        models::{DisplayInd, Event, FoodReq, Notification, ScoreInd},
        types::{Cell, Direction, Position},
    },
};

type Feed = Rc<RefCell<Vec<Notification>>>;

/// 5x5 board, food at (3,3), heading right, body tail (1,1) head (2,1).
const SMALL_GAME: &str = "W 5 5 F 3 3 S R 2 1 1 2 1";

fn session(
    config: &str,
) -> (
    Controller<
        impl FnMut(DisplayInd),
        impl FnMut(FoodReq),
        impl FnMut(ScoreInd),
    >,
    Feed,
) {
    let feed: Feed = Rc::new(RefCell::new(Vec::new()));
    let display_feed = Rc::clone(&feed);
    let food_feed = Rc::clone(&feed);
    let score_feed = Rc::clone(&feed);
    let controller = Controller::new(
        config,
        move |ind: DisplayInd| {
            display_feed.borrow_mut().push(Notification::from(ind));
        },
        move |req: FoodReq| food_feed.borrow_mut().push(Notification::from(req)),
        move |ind: ScoreInd| {
            score_feed.borrow_mut().push(Notification::from(ind));
        },
    )
    .expect("configuration should parse");
    (controller, feed)
}

fn drain(feed: &Feed) -> Vec<Notification> {
    feed.borrow_mut().drain(..).collect()
}

fn at(x: i64, y: i64) -> Position {
    Position { x, y }
}

fn display(x: i64, y: i64, value: Cell) -> Notification {
    Notification::Display {
        position: at(x, y),
        value,
    }
}

fn body_of<D, F, S>(controller: &Controller<D, F, S>) -> Vec<Position> {
    controller.segments().positions().collect()
}

#[test]
fn construction_matches_the_declared_configuration() {
    let (controller, feed) = session(SMALL_GAME);
    assert_eq!(controller.segments().len(), 2);
    assert_eq!(body_of(&controller), vec![at(1, 1), at(2, 1)]);
    assert_eq!(controller.segments().heading(), Direction::Right);
    assert_eq!(controller.world().food_position(), at(3, 3));
    assert!(!controller.paused());
    assert!(drain(&feed).is_empty());
}

#[test]
fn a_plain_move_places_the_head_and_clears_the_tail() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::Timeout);

    assert_eq!(
        drain(&feed),
        vec![display(3, 1, Cell::Snake), display(1, 1, Cell::Free)]
    );
    assert_eq!(body_of(&controller), vec![at(2, 1), at(3, 1)]);
}

#[test]
fn reaching_food_grows_the_snake_and_requests_more() {
    // same board, but the head at (2,3) is one step short of the food
    let (mut controller, feed) = session("W 5 5 F 3 3 S R 2 1 3 2 3");

    controller.receive(Event::Timeout);

    assert_eq!(
        drain(&feed),
        vec![
            display(3, 3, Cell::Snake),
            Notification::Score,
            Notification::FoodRequest,
        ]
    );
    assert_eq!(body_of(&controller), vec![at(1, 3), at(2, 3), at(3, 3)]);
}

#[test]
fn moving_out_of_bounds_only_signals_loss() {
    let (mut controller, feed) = session("W 3 3 F 2 2 S R 2 1 0 2 0");

    controller.receive(Event::Timeout);

    assert_eq!(drain(&feed), vec![Notification::Loss]);
    assert_eq!(body_of(&controller), vec![at(1, 0), at(2, 0)]);
    assert_eq!(controller.world().food_position(), at(2, 2));
}

#[test]
fn moving_into_the_body_only_signals_loss() {
    let (mut controller, feed) = session("W 5 5 F 3 3 S L 2 1 1 2 1");

    controller.receive(Event::Timeout);

    assert_eq!(drain(&feed), vec![Notification::Loss]);
    assert_eq!(body_of(&controller), vec![at(1, 1), at(2, 1)]);
}

#[test]
fn steering_changes_the_next_move() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::Direction {
        direction: Direction::Down,
    });
    assert!(drain(&feed).is_empty());

    controller.receive(Event::Timeout);
    assert_eq!(
        drain(&feed),
        vec![display(2, 2, Cell::Snake), display(1, 1, Cell::Free)]
    );
}

#[test]
fn unsolicited_food_clears_the_superseded_cell_first() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::FoodInd {
        position: at(0, 0),
    });

    assert_eq!(
        drain(&feed),
        vec![display(3, 3, Cell::Free), display(0, 0, Cell::Food)]
    );
    assert_eq!(controller.world().food_position(), at(0, 0));
}

#[test]
fn requested_food_has_no_cell_to_clear() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::FoodResp {
        position: at(0, 0),
    });

    assert_eq!(drain(&feed), vec![display(0, 0, Cell::Food)]);
    assert_eq!(controller.world().food_position(), at(0, 0));
}

#[test]
fn food_on_the_body_is_rejected_with_a_fresh_request() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::FoodInd {
        position: at(1, 1),
    });

    assert_eq!(drain(&feed), vec![Notification::FoodRequest]);
    assert_eq!(controller.world().food_position(), at(3, 3));
}

#[test]
fn food_out_of_bounds_is_rejected_with_a_fresh_request() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::FoodResp {
        position: at(9, 9),
    });

    assert_eq!(drain(&feed), vec![Notification::FoodRequest]);
    assert_eq!(controller.world().food_position(), at(3, 3));
}

#[test]
fn pausing_drops_movement_and_steering_silently() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::Pause);
    assert!(controller.paused());

    controller.receive(Event::Timeout);
    controller.receive(Event::Timeout);
    controller.receive(Event::Direction {
        direction: Direction::Down,
    });

    assert!(drain(&feed).is_empty());
    assert_eq!(body_of(&controller), vec![at(1, 1), at(2, 1)]);
    assert_eq!(controller.segments().heading(), Direction::Right);
}

#[test]
fn food_traffic_still_flows_while_paused() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::Pause);
    controller.receive(Event::FoodResp {
        position: at(0, 0),
    });

    assert_eq!(drain(&feed), vec![display(0, 0, Cell::Food)]);
}

#[test]
fn a_second_pause_resumes_the_game() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::Pause);
    controller.receive(Event::Pause);
    assert!(!controller.paused());

    controller.receive(Event::Timeout);
    assert_eq!(
        drain(&feed),
        vec![display(3, 1, Cell::Snake), display(1, 1, Cell::Free)]
    );
}

#[test]
fn the_snake_keeps_playing_after_rejected_food() {
    let (mut controller, feed) = session(SMALL_GAME);

    controller.receive(Event::FoodInd {
        position: at(2, 1),
    });
    assert_eq!(drain(&feed), vec![Notification::FoodRequest]);

    controller.receive(Event::FoodResp {
        position: at(4, 4),
    });
    assert_eq!(drain(&feed), vec![display(4, 4, Cell::Food)]);

    controller.receive(Event::Timeout);
    assert_eq!(
        drain(&feed),
        vec![display(3, 1, Cell::Snake), display(1, 1, Cell::Free)]
    );
}
