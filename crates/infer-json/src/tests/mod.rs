mod property_payload;
