mod dump;
mod facts;
mod graph;
mod intern;
mod tab_delim;

pub mod cli;
