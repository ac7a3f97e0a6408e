fn main() -> Result<(), eframe::Error> {
    carbontrack_frontend::run_frontend()
}
