mod structured_tests;
