pub mod firm;
