fn main() {
    forter::term::main()
}
