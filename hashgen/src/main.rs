mod app;
mod cli;
mod report;
mod search;

fn main() {
    app::run();
}
