mod current_user;
