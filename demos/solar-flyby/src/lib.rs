use wasm_bindgen::prelude::*;
use flyby_engine::*;

pub mod bezier;
pub mod bodies;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod navigation;
pub mod orbit;
pub mod path;
pub mod render;
use game::SolarFlyby;

flyby_web::export_game!(SolarFlyby, "solar-flyby");
