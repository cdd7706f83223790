mod mean_tests;
