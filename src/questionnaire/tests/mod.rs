mod common;

mod content;
