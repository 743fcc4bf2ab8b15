mod config;
mod expr;
mod figure;
mod name;
mod sample;
mod style;
