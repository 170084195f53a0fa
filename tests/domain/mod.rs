mod action_test;
