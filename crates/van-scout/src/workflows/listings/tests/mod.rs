mod candidates;
mod common;
