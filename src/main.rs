fn main() {
    tunetnaplo_lib::run()
}
