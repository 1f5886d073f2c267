use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use color_eyre::Result;
use log::info;
use rand::Rng;
use snake_controller::{
    controller::{Controller, GameConfig},
    gridsnake::{
        models::{DisplayInd, Event, FoodReq, ScoreInd},
        types::{Cell, Dimension, Direction, Position},
    },
};

const CONFIG: &str = "W 12 12 F 8 6 S R 3 2 6 3 6 4 6";
const TICKS: usize = 60;
const FOOD_ATTEMPTS: usize = 100;

/// Display collaborator: a grid of cells updated one notification at a
/// time, drawn after every tick.
struct BoardView {
    dimension: Dimension,
    cells:     HashMap<Position, Cell>,
}

impl BoardView {
    fn new(config: &GameConfig) -> Self {
        let mut cells = HashMap::new();
        cells.insert(config.food, Cell::Food);
        for position in &config.body {
            cells.insert(*position, Cell::Snake);
        }
        Self {
            dimension: config.dimension,
            cells,
        }
    }

    fn apply(&mut self, ind: DisplayInd) {
        match ind.value {
            Cell::Free => {
                self.cells.remove(&ind.position);
            },
            value => {
                self.cells.insert(ind.position, value);
            },
        }
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.dimension.height {
            for x in 0..self.dimension.width {
                let glyph = match self.cells.get(&Position { x, y }) {
                    Some(Cell::Snake) => '#',
                    Some(Cell::Food) => '*',
                    _ => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let config = GameConfig::parse(CONFIG)?;
    let dimension = config.dimension;

    let board = Rc::new(RefCell::new(BoardView::new(&config)));
    let pending_food = Rc::new(RefCell::new(0_usize));
    let score = Rc::new(RefCell::new(0_u64));
    let lost = Rc::new(RefCell::new(false));

    let mut controller = Controller::new(
        CONFIG,
        {
            let board = Rc::clone(&board);
            move |ind: DisplayInd| board.borrow_mut().apply(ind)
        },
        {
            let pending_food = Rc::clone(&pending_food);
            move |_req: FoodReq| *pending_food.borrow_mut() += 1
        },
        {
            let score = Rc::clone(&score);
            let lost = Rc::clone(&lost);
            move |ind: ScoreInd| match ind {
                ScoreInd::Scored => *score.borrow_mut() += 1,
                ScoreInd::Lost => *lost.borrow_mut() = true,
            }
        },
    )?;

    // trace a rectangle: turn every five ticks, staying inside the board
    static TURNS: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];

    let mut rng = rand::rng();
    let mut turns = TURNS.iter().cycle();

    for tick in 0..TICKS {
        if tick % 5 == 4 {
            if let Some(&direction) = turns.next() {
                controller.receive(Event::Direction { direction });
            }
        }

        controller.receive(Event::Timeout);
        if *lost.borrow() {
            info!("lost on tick {tick}");
            break;
        }

        // answer food requests the way a spawner collaborator would
        for _ in 0..FOOD_ATTEMPTS {
            if *pending_food.borrow() == 0 {
                break;
            }
            *pending_food.borrow_mut() -= 1;
            let position = Position {
                x: rng.random_range(0..dimension.width),
                y: rng.random_range(0..dimension.height),
            };
            controller.receive(Event::FoodResp { position });
        }

        println!("tick {tick}, score {}", *score.borrow());
        println!("{}", *board.borrow());
    }

    println!("final score: {}", *score.borrow());

    Ok(())
}
