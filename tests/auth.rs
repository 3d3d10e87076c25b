#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use fichaje::db::kv::MemoryKv;
    use fichaje::db::storage::{ProductStore, ShiftStore, Storage, UserStore};
    use fichaje::libs::admin::{AdminRecord, ShiftOwner};
    use fichaje::libs::auth::{authenticate, AuthError};
    use fichaje::libs::product::Product;
    use fichaje::libs::shift::ShiftLog;
    use fichaje::libs::user::{initial_users, Context, Locale, Role, User, Worker};

    #[test]
    fn test_valid_worker_login() {
        let user = authenticate(&initial_users(), "empleado1", "123", Context::Shop(Locale::Yummy)).unwrap();
        assert_eq!(user.id, "2");
        assert_eq!(user.role, Role::Worker);
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let err = authenticate(&initial_users(), "empleado1", "124", Context::Shop(Locale::Yummy)).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let err = authenticate(&initial_users(), "nadie", "123", Context::AdminPanel).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_username_match_is_exact() {
        let err = authenticate(&initial_users(), "Admin", "123", Context::AdminPanel).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_admin_panel_requires_admin() {
        let err = authenticate(&initial_users(), "empleado2", "123", Context::AdminPanel).unwrap_err();
        assert_eq!(err, AuthError::AdminOnly);

        let admin = authenticate(&initial_users(), "jefe", "123", Context::AdminPanel).unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn test_worker_limited_to_allowed_shops() {
        let err = authenticate(&initial_users(), "empleado1", "123", Context::Shop(Locale::Uwu)).unwrap_err();
        assert_eq!(err, AuthError::LocaleNotAllowed(Locale::Uwu));
        assert_eq!(err.to_string(), "you are not allowed to work at uwu");
    }

    #[test]
    fn test_admin_works_in_any_shop() {
        let mut users = initial_users();
        users[0].allowed_locales.clear();
        for locale in Locale::ALL {
            assert!(authenticate(&users, "admin", "123", Context::Shop(locale)).is_ok());
        }
    }

    #[test]
    fn test_admin_record_upserts_user() {
        let store = Storage::new(MemoryKv::new());
        let mut user = store.users().unwrap()[3].clone();
        user.allowed_locales = vec![Locale::Yummy];
        AdminRecord::User(user.clone()).apply(&store).unwrap();

        let users = store.users().unwrap();
        assert_eq!(users.len(), 4);
        assert_eq!(users[3].allowed_locales, vec![Locale::Yummy]);
        assert!(authenticate(&users, "empleado2", "123", Context::Shop(Locale::Uwu)).is_err());
    }

    #[test]
    fn test_admin_record_rejects_duplicate_username() {
        let store = Storage::new(MemoryKv::new());
        let clash = User {
            id: "new".to_string(),
            username: "jefe".to_string(),
            password: "x".to_string(),
            role: Role::Worker,
            allowed_locales: vec![Locale::Uwu],
        };
        assert!(AdminRecord::User(clash).apply(&store).is_err());
        assert_eq!(store.users().unwrap().len(), 4);
    }

    #[test]
    fn test_admin_record_products_per_shop() {
        let store = Storage::new(MemoryKv::new());
        let mut latte = store.products(Locale::Uwu).unwrap()[0].clone();
        latte.price = 4.5;
        AdminRecord::Product {
            locale: Locale::Uwu,
            product: latte.clone(),
        }
        .apply(&store)
        .unwrap();

        let waffle = Product::new("y4", "Gofre", 3.0, "🧇", "Especiales");
        let record = AdminRecord::Product {
            locale: Locale::Yummy,
            product: waffle.clone(),
        };
        record.apply(&store).unwrap();

        let uwu = store.products(Locale::Uwu).unwrap();
        assert_eq!(uwu.len(), 3);
        assert_eq!(uwu[0].price, 4.5);

        let yummy = store.products(Locale::Yummy).unwrap();
        assert_eq!(yummy.len(), 4);
        assert_eq!(yummy[3], waffle);

        record.remove(&store).unwrap();
        assert_eq!(store.products(Locale::Yummy).unwrap().len(), 3);
        assert_eq!(store.products(Locale::Uwu).unwrap().len(), 3);
        assert_eq!(record.label(), "Gofre");
    }

    #[test]
    fn test_shift_owner_of_deleted_account() {
        let store = Storage::new(MemoryKv::new());
        let leaver = store.users().unwrap()[3].clone();
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let worker = Worker::new(&leaver, Locale::Uwu);
        store
            .add_shift_log(&ShiftLog::new(&worker, start, start + TimeDelta::hours(6), TimeDelta::zero()))
            .unwrap();
        AdminRecord::User(leaver.clone()).remove(&store).unwrap();

        let users = store.users().unwrap();
        let shifts = store.shift_logs().unwrap();
        let expected = ShiftOwner {
            user_id: leaver.id.clone(),
            username: leaver.username.clone(),
        };
        assert_eq!(ShiftOwner::find(&users, &shifts, &leaver.id), Some(expected.clone()));
        assert_eq!(ShiftOwner::find(&users, &shifts, "empleado2"), Some(expected));

        store.clear_shift_logs(&leaver.id).unwrap();
        assert!(store.shift_logs().unwrap().is_empty());
    }

    #[test]
    fn test_shift_owner_prefers_current_accounts() {
        let users = initial_users();
        let owner = ShiftOwner::find(&users, &[], "jefe").unwrap();
        assert_eq!(owner.user_id, "1");
        assert_eq!(ShiftOwner::find(&users, &[], "2").unwrap().username, "empleado1");
        assert_eq!(ShiftOwner::find(&users, &[], "nadie"), None);
    }
}
