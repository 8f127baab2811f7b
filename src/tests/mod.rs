mod destination_update;
