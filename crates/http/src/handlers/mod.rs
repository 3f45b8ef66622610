pub mod animals;
