use ferris_barber_shop::BarberShopError;

fn main() -> Result<(), BarberShopError> {
    ferris_barber_shop::run()
}
