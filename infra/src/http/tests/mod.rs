mod refresh_client_tests;
