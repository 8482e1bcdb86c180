mod aggregator_tests;
mod alert_tests;
