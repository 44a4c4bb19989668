mod dynamodb_tests;
