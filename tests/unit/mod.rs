/// Unit test harness entry point

mod basic_tests;
