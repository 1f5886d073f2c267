use std::sync::{Arc, Mutex};

use color_eyre::Result;
use log::{error, info};
use snake_controller::{
    controller::{ConfigurationError, Controller},
    gridsnake::models::{DisplayInd, Event, FoodReq, Notification, ScoreInd, Status},
};
use warp::{
    http::{Method, StatusCode},
    Filter,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_CONFIG: &str = "W 20 20 F 10 5 S R 3 5 10 6 10 7 10";

/// Ordered record of everything the current event emitted, shared by the
/// three sinks so cross-channel ordering survives into the reply.
type Feed = Arc<Mutex<Vec<Notification>>>;

type DisplaySink = Box<dyn FnMut(DisplayInd) + Send>;
type FoodSink = Box<dyn FnMut(FoodReq) + Send>;
type ScoreSink = Box<dyn FnMut(ScoreInd) + Send>;
type SessionController = Controller<DisplaySink, FoodSink, ScoreSink>;

fn push(feed: &Feed, note: Notification) {
    if let Ok(mut feed) = feed.lock() {
        feed.push(note);
    }
}

fn build_session(
    config: &str,
    feed: &Feed,
) -> Result<SessionController, ConfigurationError> {
    let display_feed = Arc::clone(feed);
    let food_feed = Arc::clone(feed);
    let score_feed = Arc::clone(feed);
    Controller::new(
        config,
        Box::new(move |ind: DisplayInd| {
            push(&display_feed, Notification::from(ind));
        }) as DisplaySink,
        Box::new(move |req: FoodReq| push(&food_feed, Notification::from(req)))
            as FoodSink,
        Box::new(move |ind: ScoreInd| push(&score_feed, Notification::from(ind)))
            as ScoreSink,
    )
}

async fn handle_rejection(
    err: warp::Rejection,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Some(violation) = err.find::<warp::filters::body::BodyDeserializeError>()
    {
        error!("protocol violation: {violation}");
        Ok(warp::reply::with_status(
            "unexpected event".to_owned(),
            StatusCode::BAD_REQUEST,
        ))
    } else {
        Err(err)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let config = std::env::var("SNAKE_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG.to_owned());

    let feed: Feed = Arc::new(Mutex::new(Vec::new()));
    let session = Arc::new(Mutex::new(build_session(&config, &feed)?));
    info!("session configured as `{config}`");

    let cors = warp::cors()
        .allow_method(Method::GET)
        .allow_method(Method::POST)
        .allow_header("content-type")
        .allow_any_origin();

    let logging = warp::log(NAME);

    let status = warp::get().and(warp::path::end()).map(|| {
        warp::reply::json(&Status {
            name:    NAME.to_owned(),
            version: VERSION.to_owned(),
        })
    });

    let event_session = Arc::clone(&session);
    let event_feed = Arc::clone(&feed);
    let event = warp::post()
        .and(warp::path("event"))
        .and(warp::body::json())
        .map(move |event: Event| {
            let mut emitted = Vec::new();
            if let Ok(mut controller) = event_session.lock() {
                controller.receive(event);
                if let Ok(mut feed) = event_feed.lock() {
                    emitted.append(&mut feed);
                }
            }
            warp::reply::json(&emitted)
        });

    let reset_session = Arc::clone(&session);
    let reset_feed = Arc::clone(&feed);
    let reset_config = config.clone();
    let reset = warp::post().and(warp::path("reset")).map(move || {
        if let Ok(mut feed) = reset_feed.lock() {
            feed.clear();
        }
        match build_session(&reset_config, &reset_feed) {
            Ok(fresh) => {
                if let Ok(mut controller) = reset_session.lock() {
                    *controller = fresh;
                }
                info!("session reset");
            },
            // the configuration was valid at startup and never changes
            Err(err) => error!("reset failed: {err}"),
        }
        String::new()
    });

    let api = status
        .or(event)
        .or(reset)
        .recover(handle_rejection)
        .with(cors)
        .with(logging);

    warp::serve(api).run(([0, 0, 0, 0], 6502)).await;

    Ok(())
}
