pub mod synthetic_plate;
