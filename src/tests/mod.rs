mod common;

mod auth_tests;
mod team_tests;
