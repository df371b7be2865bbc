pub mod eta_mock;
