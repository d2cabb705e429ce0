fn main() {
    if let Err(e) = block_maze::game::run() {
        log::error!("Event loop failed: {}", e);
        std::process::exit(1);
    }
}
